use crate::demand::DemandEstimate;
use crate::error::DemandError;
use crate::flight::Category;
use std::io;

const TOTAL_COLUMN: &str = "Total_Buses_Required";
const COLUMNS: [Category; 3] = [Category::Departure, Category::Arrival, Category::Domestic];

/// Writes one row per grid point: time, each category and the total.
pub fn write_series(estimate: &DemandEstimate, out: impl io::Write) -> Result<(), DemandError> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["time".to_string()];
    header.extend(COLUMNS.iter().map(|c| c.to_string()));
    header.push(TOTAL_COLUMN.to_string());
    writer.write_record(&header)?;

    for (i, (time, total)) in estimate.total.iter().enumerate() {
        let mut row = vec![time.to_string()];
        row.extend(
            COLUMNS
                .iter()
                .map(|c| estimate.series(*c).values()[i].to_string()),
        );
        row.push(total.to_string());
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_to_file(estimate: &DemandEstimate, path: &str) -> Result<(), DemandError> {
    let file = std::fs::File::create(path)?;
    write_series(estimate, io::BufWriter::new(file))?;
    log::info!("Exported {} rows to {}", estimate.grid.len(), path);
    Ok(())
}
