//! `CommandConverter` against small shell scripts standing in for the VLMD
//! tool. Each script receives `<input> <output.csv>` and writes the JSON next
//! to the CSV.

#![cfg(unix)]

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use hdd_config::ConverterConfig;
use hdd_convert::{
    CommandConverter, ConversionDriver, ConversionRequest, ConvertError, DriverOptions,
    VlmdConverter,
};
use hdd_core::{InputType, OutputLayout, StudyIdentity};
use pretty_assertions::assert_eq;
use serde_json::json;

const WRITES_VALID_PAIR: &str = r#"
test -f "$1" || { echo "no such input: $1" >&2; exit 2; }
printf 'name,description\nage,Age in years\n' > "$2"
printf '{"title":"pain","data_dictionary":[{"name":"age"}]}' > "${2%.csv}.json"
"#;

fn script_converter(dir: &Path, body: &str) -> CommandConverter {
    let script = dir.join("convert.sh");
    fs::write(&script, body).unwrap();
    CommandConverter::from_config(&ConverterConfig {
        program: "sh".into(),
        args: vec![
            script.display().to_string(),
            "{input}".into(),
            "{output}".into(),
        ],
    })
    .unwrap()
}

fn request(input: &Path) -> ConversionRequest<'_> {
    ConversionRequest {
        input_path: input,
        input_type: InputType::RedcapCsv,
        artifact_stem: "HDP1_pain.vlmd",
        title: "pain",
        description: "converted",
    }
}

fn input_file(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("pain.csv");
    fs::write(&input, "variable,label\nage,Age\n").unwrap();
    input
}

#[tokio::test]
async fn reads_back_the_csv_and_json_pair() {
    let tmp = tempfile::tempdir().unwrap();
    let converter = script_converter(tmp.path(), WRITES_VALID_PAIR);
    let input = input_file(tmp.path());

    let payload = converter.convert(&request(&input)).await.unwrap();

    assert_eq!(payload.csv, "name,description\nage,Age in years\n");
    assert_eq!(
        payload.json,
        json!({ "title": "pain", "data_dictionary": [{ "name": "age" }] })
    );
    assert!(payload.checks.is_valid());
    assert!(payload.checks.messages.is_empty());
}

#[tokio::test]
async fn header_only_csv_fails_the_csv_check() {
    let tmp = tempfile::tempdir().unwrap();
    let converter = script_converter(
        tmp.path(),
        r#"
printf 'name,description\n' > "$2"
printf '{"data_dictionary":[]}' > "${2%.csv}.json"
echo "no variables found" >&2
"#,
    );
    let input = input_file(tmp.path());

    let payload = converter.convert(&request(&input)).await.unwrap();

    assert!(!payload.checks.csv_valid);
    assert!(payload.checks.json_valid);
    assert_eq!(payload.checks.messages, ["no variables found"]);
}

#[tokio::test]
async fn empty_json_array_fails_the_json_check() {
    let tmp = tempfile::tempdir().unwrap();
    let converter = script_converter(
        tmp.path(),
        r#"
printf 'name,description\nage,Age\n' > "$2"
printf '[]' > "${2%.csv}.json"
"#,
    );
    let input = input_file(tmp.path());

    let payload = converter.convert(&request(&input)).await.unwrap();

    assert!(payload.checks.csv_valid);
    assert!(!payload.checks.json_valid);
    assert!(!payload.checks.is_valid());
}

#[tokio::test]
async fn clean_exit_without_artifacts_is_missing_output() {
    let tmp = tempfile::tempdir().unwrap();
    let converter = script_converter(tmp.path(), "exit 0\n");
    let input = input_file(tmp.path());

    let err = converter.convert(&request(&input)).await.unwrap_err();
    assert!(matches!(err, ConvertError::MissingOutput { ref path } if path.ends_with("HDP1_pain.vlmd.csv")));
}

#[tokio::test]
async fn non_zero_exit_carries_stderr() {
    let tmp = tempfile::tempdir().unwrap();
    let converter = script_converter(tmp.path(), "echo 'bad header row' >&2\nexit 3\n");
    let input = input_file(tmp.path());

    let err = converter.convert(&request(&input)).await.unwrap_err();
    match err {
        ConvertError::Failed { stderr, .. } => assert_eq!(stderr, "bad header row"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn relative_study_directory_reaches_the_converter() {
    let tools = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    // under the test's working directory, addressed by a relative path
    let clean = tempfile::tempdir_in(".").unwrap();
    fs::write(clean.path().join("a.csv"), "variable,label\nage,Age\n").unwrap();
    let relative = Path::new(clean.path().file_name().unwrap());
    assert!(relative.is_relative());

    let identity = StudyIdentity::new("HDP1", None)
        .with_appl_id(Some("1".into()))
        .with_title("Pain");
    let driver = ConversionDriver::new(
        script_converter(tools.path(), WRITES_VALID_PAIR),
        OutputLayout::new(output.path(), &identity),
        identity,
        DriverOptions {
            repository_url: "https://github.com/example/dd/tree/main".into(),
            overwrite: false,
            today: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        },
    );

    let report = driver.run(relative).await.unwrap();

    assert_eq!((report.converted, report.failed), (1, 0), "{:?}", report.files);
    assert!(driver.layout().vlmd_dir.join("a/HDP1_a.vlmd.json").is_file());
}
