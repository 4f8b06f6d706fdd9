use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No data to chart")]
    NoData,

    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("Chart generation error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;

/// Wrap a plotters error with the drawing step that produced it.
pub(crate) fn render_error<E: std::fmt::Display>(step: &'static str) -> impl Fn(E) -> ChartError {
    move |e| ChartError::Render(format!("Failed to {}: {}", step, e))
}
