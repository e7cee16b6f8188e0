use std::error::Error;

use folio::filter::{Facet, FilterEvent};
use folio::loader::DataSource;
use folio::output::{self, OutputFormat};
use folio::runner::{Options, Runner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        data: DataSource::FilePath("./demos/projects-data.xml".to_string()),
        query: Some("https://example.com/projects.html?type=Game".to_string()),
        events: vec![
            FilterEvent::Select(Facet::Platform, Some("VR".to_string())),
            FilterEvent::Query("puzzle".to_string()),
        ],
        ..Options::default()
    })?;
    let result = runner.run().await?;

    if !result.has_data() {
        println!("{}", output::LOAD_ERROR_MESSAGE);
        return Ok(());
    }

    let report = output::build_report(&result.gallery);
    print!(
        "{}",
        String::from_utf8_lossy(&output::render(OutputFormat::Text, &report))
    );
    println!("Link: {}", report.location);

    Ok(())
}
