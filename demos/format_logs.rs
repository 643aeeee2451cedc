//! Log formatting example: produce Stackdriver-schema JSON for records of
//! varying severity.

use integrations_monitoring::{FormatterConfig, LogLevel, LogRecord, StackdriverFormatter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let formatter = StackdriverFormatter::new(FormatterConfig::new("demo", "0.1"));

    let info = LogRecord::new(LogLevel::Info, "service listening")
        .with_field("port", 8080);
    print!("{}", String::from_utf8(formatter.format(&info)?)?);

    // Error records carry the resolved call site of this very line.
    let error = LogRecord::new(LogLevel::Error, "upstream unreachable")
        .with_field("upstream", "billing");
    print!("{}", String::from_utf8(formatter.format(&error)?)?);

    Ok(())
}
