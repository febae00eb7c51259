// Example usage of the LBY reader

use lby_reader::{LbyReader, Result};
use tracing::{debug, info, Level};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "data/HC0010.LBY".to_string());

    let reader = LbyReader::open(&path)?;

    info!("File: {}", reader.path().display());
    info!("Data offset: {} bytes", reader.data_offset());
    info!("Captured: {}", reader.timestamp());

    for s in reader.header_strings() {
        debug!("  header: {}", s);
    }

    let series = reader.series();
    info!("Total samples: {}", series.len());
    info!("Duration: {:.1} s", series.duration_s());
    info!("Peak force: {:.3} kN", series.peak_force());

    if let (Some(first), Some(last)) = (series.samples.first(), series.samples.last()) {
        info!("First sample: t={:.1}s, force={:.3} kN", first.elapsed_s, first.force_kn);
        info!("Last sample: t={:.1}s, force={:.3} kN", last.elapsed_s, last.force_kn);
    }

    if let Some(t) = series.absolute_time(series.len().saturating_sub(1)) {
        info!("Last sample wall clock: {}", t);
    }

    Ok(())
}
