use chrono::Local;
use num_format::{CustomFormat, Grouping, ToFormattedString};
use std::io::Write;

pub(super) fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5}] {}",
                local_time(),
                record.level(),
                record.args()
            )
        })
        .init();
}

pub(super) fn print_population(population: usize) {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()
        .unwrap_or_default();
    println!("Population: {}", population.to_formatted_string(&fmt));
}

pub(super) fn local_time() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}
