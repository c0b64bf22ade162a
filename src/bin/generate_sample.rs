use rust_xlsxwriter::Workbook;

/// Deterministic splitmix64 sequence, so every run writes the same sample.
struct SampleRng(u64);

impl SampleRng {
    fn step(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.step() % n
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        (self.step() >> 11) as f64 / ((1u64 << 53) as f64) < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SampleRng(42);

    let first_names = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank", "Grace", "Heidi"];
    let last_names = ["Smith", "Jones", "Müller", "Rossi", "Dubois", "Tanaka"];
    let cities = ["Berlin", "Boston", "Bern", "Lisbon", "Osaka", "Toronto"];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("People").expect("Failed to name worksheet");

    for (col, title) in ["Name", "Age", "City", "Active", "Score"].iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .expect("Failed to write header");
    }

    let n_rows: u32 = 200;
    for row in 1..=n_rows {
        let name = format!("{} {}", rng.pick(&first_names), rng.pick(&last_names));
        let age = 18 + rng.below(60) as u32;
        let score = rng.below(1001) as f64 / 10.0;

        sheet.write_string(row, 0, name).expect("Failed to write name");
        sheet.write_number(row, 1, age).expect("Failed to write age");
        // Roughly one row in ten has no city, to exercise sparse rows.
        if !rng.chance(0.1) {
            sheet
                .write_string(row, 2, rng.pick(&cities))
                .expect("Failed to write city");
        }
        sheet
            .write_boolean(row, 3, rng.chance(0.7))
            .expect("Failed to write flag");
        sheet.write_number(row, 4, score).expect("Failed to write score");
    }

    // Only the first worksheet is shown by the viewer.
    let notes = workbook.add_worksheet();
    notes.set_name("Notes").expect("Failed to name worksheet");
    notes
        .write_string(0, 0, "Generated by generate_sample; ignored by the viewer.")
        .expect("Failed to write note");

    let output_path = "sample_data.xlsx";
    workbook.save(output_path).expect("Failed to write workbook");

    println!("Wrote {n_rows} rows to {output_path}");
}
