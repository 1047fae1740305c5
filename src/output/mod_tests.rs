use super::*;

fn result() -> CheckResult {
    CheckResult::from_outcome("rules::check_has_title", "/music/a.mp3", Ok(true))
}

#[test]
fn output_format_value_names() {
    use clap::ValueEnum;

    assert_eq!(OutputFormat::from_str("text", true).unwrap(), OutputFormat::Text);
    assert_eq!(OutputFormat::from_str("JSON", true).unwrap(), OutputFormat::Json);
    assert!(OutputFormat::from_str("sarif", true).is_err());
}

#[test]
fn vec_sink_collects_results() {
    let mut sink: Vec<CheckResult> = Vec::new();
    sink.write(&result()).unwrap();
    sink.write(&result()).unwrap();
    sink.finish().unwrap();

    assert_eq!(sink.len(), 2);
}

#[test]
fn create_sink_picks_format() {
    let mut buffer = Vec::new();
    {
        let mut sink = create_sink(OutputFormat::Json, &mut buffer, ColorMode::Never);
        sink.write(&result()).unwrap();
        sink.finish().unwrap();
    }
    let output = String::from_utf8(buffer).unwrap();
    assert!(output.starts_with('{'));
    assert!(output.contains("\"status\":\"pass\""));

    let mut buffer = Vec::new();
    {
        let mut sink = create_sink(OutputFormat::Text, &mut buffer, ColorMode::Never);
        sink.write(&result()).unwrap();
        sink.finish().unwrap();
    }
    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains("PASS"));
    assert!(output.contains("rules::check_has_title"));
}
