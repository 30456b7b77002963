use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use launch_dash::data::model::columns;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Launch {
    flight: i64,
    site: &'static str,
    payload: f64,
    class: i64,
    booster_version: String,
    category: &'static str,
    outcome: &'static str,
}

/// Booster generations in flight order: (category, success rate, max payload kg).
const GENERATIONS: [(&str, f64, f64); 5] = [
    ("v1.0", 0.4, 700.0),
    ("v1.1", 0.55, 4500.0),
    ("FT", 0.75, 6800.0),
    ("B4", 0.8, 7500.0),
    ("B5", 0.95, 15600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn generate(rng: &mut SimpleRng, count: usize) -> Vec<Launch> {
    (0..count)
        .map(|i| {
            let gen_idx = i * GENERATIONS.len() / count;
            let (category, success_rate, max_payload) = GENERATIONS[gen_idx];
            let payload = (rng.next_f64() * max_payload).round();
            // heavier payloads fail slightly more often
            let p_success = success_rate - 0.1 * payload / 15600.0;
            let class = i64::from(rng.next_f64() < p_success);
            Launch {
                flight: i as i64 + 1,
                site: *rng.pick(&SITES),
                payload,
                class,
                booster_version: format!("F9 {category} B{}", 1000 + i),
                category,
                outcome: if rng.next_f64() < 0.98 { "Success" } else { "Failure (in flight)" },
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            columns::FLIGHT_NUMBER,
            columns::LAUNCH_SITE,
            columns::CLASS,
            columns::PAYLOAD_MASS,
            columns::BOOSTER_VERSION,
            columns::BOOSTER_CATEGORY,
            columns::MISSION_OUTCOME,
        ])
        .expect("Failed to write CSV header");
    for l in launches {
        writer
            .write_record([
                l.flight.to_string(),
                l.site.to_string(),
                l.class.to_string(),
                format!("{:.1}", l.payload),
                l.booster_version.clone(),
                l.category.to_string(),
                l.outcome.to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(path: &str, launches: &[Launch]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new(columns::FLIGHT_NUMBER, DataType::Int64, false),
        Field::new(columns::LAUNCH_SITE, DataType::Utf8, false),
        Field::new(columns::CLASS, DataType::Int64, false),
        Field::new(columns::PAYLOAD_MASS, DataType::Float64, false),
        Field::new(columns::BOOSTER_VERSION, DataType::Utf8, false),
        Field::new(columns::BOOSTER_CATEGORY, DataType::Utf8, false),
        Field::new(columns::MISSION_OUTCOME, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.category))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.outcome))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    env_logger::init();
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng, 56);

    write_csv("sample_launches.csv", &launches);
    write_parquet("sample_launches.parquet", &launches);

    let successes = launches.iter().filter(|l| l.class == 1).count();
    log::info!("generated {} launches, {successes} successful", launches.len());
    println!(
        "Wrote {} launches to sample_launches.csv and sample_launches.parquet",
        launches.len()
    );
}
