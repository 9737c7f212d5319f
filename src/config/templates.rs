use tera::Tera;
use tracing::info;

use crate::error::AppResult;

pub const INDEX_TEMPLATE: &str = "polls/index.html";
pub const DETAIL_TEMPLATE: &str = "polls/detail.html";
pub const RESULTS_TEMPLATE: &str = "polls/results.html";

/// Compiles the page templates bundled into the binary.
pub fn init_templates() -> AppResult<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (INDEX_TEMPLATE, include_str!("../../templates/polls/index.html")),
        (DETAIL_TEMPLATE, include_str!("../../templates/polls/detail.html")),
        (RESULTS_TEMPLATE, include_str!("../../templates/polls/results.html")),
    ])?;
    info!("Templates compiled:: ✅");
    Ok(tera)
}
