use derive_builder::Builder;
use std::path::PathBuf;

/// Settings the pipeline needs to run. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Config {
    /// CSV file with a header row followed by customer rows.
    pub input_path: PathBuf,
    /// Number of workers; also the capacity of every queue in the pipeline.
    pub concurrency: usize,
    /// Capacity of the buffered reader over the input file, in bytes.
    pub read_buffer_size: usize,
}

impl Config {
    /// Check the invariants a directly constructed `Config` may have skipped.
    ///
    /// # Errors
    /// Returns `EngineError::Config` when a numeric setting is zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        check_positive("concurrency", self.concurrency)
            .and_then(|()| check_positive("read_buffer_size", self.read_buffer_size))
            .map_err(crate::error::EngineError::Config)
    }
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(concurrency) = self.concurrency {
            check_positive("concurrency", concurrency)?;
        }
        if let Some(size) = self.read_buffer_size {
            check_positive("read_buffer_size", size)?;
        }
        Ok(())
    }
}

fn check_positive(name: &str, value: usize) -> Result<(), String> {
    if value == 0 {
        return Err(format!("{name} must be greater than 0"));
    }
    Ok(())
}
