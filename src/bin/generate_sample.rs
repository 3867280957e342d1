use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Minimal deterministic PRNG (xorshift64*)
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }

    /// Price with cents, as the feeds deliver it: sometimes integral,
    /// sometimes with one or two decimals.
    fn price(&mut self) -> String {
        let whole = self.range(1_500, 45_000);
        match self.next_u64() % 3 {
            0 => format!("{whole}"),
            1 => format!("{whole}.{}", self.range(0, 10)),
            _ => format!("{whole}.{:02}", self.range(0, 100)),
        }
    }
}

struct Car {
    model: String,
    year: u64,
    price: String,
    fuel: String,
}

fn generate_car(rng: &mut SampleRng) -> Car {
    // Mixed source casing on purpose: the pipeline title-cases on output.
    let models = [
        "civic", "civic", "Civic", "corolla", "corolla", "COROLLA", "focus",
        "golf", "golf", "model 3", "outback", "PRIUS", "prius",
    ];
    let fuels = ["gasoline", "diesel", "hybrid", "electric"];

    Car {
        model: rng.pick(&models).to_string(),
        year: rng.range(1998, 2024),
        price: rng.price(),
        fuel: rng.pick(&fuels).to_string(),
    }
}

fn write_csv(path: &Path, cars: &[Car]) {
    let file = File::create(path).expect("Failed to create csv file");
    let mut w = BufWriter::new(file);
    writeln!(w, "car_model,year_of_manufacture,price,fuel").expect("Failed to write header");
    for car in cars {
        writeln!(w, "{},{},{},{}", car.model, car.year, car.price, car.fuel)
            .expect("Failed to write row");
    }
}

fn write_json(path: &Path, cars: &[Car]) {
    let file = File::create(path).expect("Failed to create json file");
    let mut w = BufWriter::new(file);
    for car in cars {
        let line = serde_json::json!({
            "car_model": car.model,
            "year_of_manufacture": car.year,
            "price": car.price,
            "fuel": car.fuel,
        });
        writeln!(w, "{line}").expect("Failed to write row");
    }
}

fn write_xml(path: &Path, cars: &[Car]) {
    let file = File::create(path).expect("Failed to create xml file");
    let mut w = BufWriter::new(file);
    writeln!(w, "<root>").expect("Failed to write root");
    for car in cars {
        writeln!(w, "  <row>").expect("Failed to write row");
        writeln!(w, "    <car_model>{}</car_model>", car.model).expect("Failed to write field");
        writeln!(w, "    <year>{}</year>", car.year).expect("Failed to write field");
        writeln!(w, "    <price>{}</price>", car.price).expect("Failed to write field");
        writeln!(w, "    <fuel>{}</fuel>", car.fuel).expect("Failed to write field");
        writeln!(w, "  </row>").expect("Failed to write row");
    }
    writeln!(w, "</root>").expect("Failed to write root");
}

fn main() {
    let mut rng = SampleRng::new(42);

    let out_dir = Path::new("dealership_data");
    fs::create_dir_all(out_dir).expect("Failed to create output directory");

    let files_per_format = 2;
    let cars_per_file = 30;
    let mut total = 0;

    for i in 1..=files_per_format {
        let writers: [(&str, fn(&Path, &[Car])); 3] = [
            ("csv", write_csv),
            ("json", write_json),
            ("xml", write_xml),
        ];
        for (ext, write) in writers {
            let cars: Vec<Car> = (0..cars_per_file).map(|_| generate_car(&mut rng)).collect();
            write(&out_dir.join(format!("dealership_{i}.{ext}")), &cars);
            total += cars.len();
        }
    }

    println!(
        "Wrote {total} cars across {} files to {}",
        files_per_format * 3,
        out_dir.display()
    );
}
