/*!
 * Integration tests for exporting run results to a ZIP archive
 */

use std::fs::File;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use wflocale::app_config::{TranslationConfig, TranslationProvider};
use wflocale::app_controller::Controller;
use wflocale::content::{TranslatedNode, extract};
use wflocale::export::{ExportEntry, export_to_file};
use wflocale::providers::mock::MockProvider;
use wflocale::translation::TranslationService;

use crate::common::{FakeContentApi, create_temp_dir, sample_document, sample_locales};

#[tokio::test]
async fn test_exportToFile_fromRunStatuses_shouldContainOneFilePerTranslatedLocale() {
    let api = Arc::new(FakeContentApi::new().failing_writes_for("l-de"));
    let mut config = TranslationConfig::default();
    config.set_api_key(TranslationProvider::OpenAI, "sk-test");
    let translator = Arc::new(TranslationService::with_provider(
        config,
        Box::new(MockProvider::echo()),
    ));
    let controller = Controller::new(api, translator, Duration::ZERO);
    let extracted = extract(&sample_document());
    let statuses = controller
        .translate_page("page-1", &extracted, &sample_locales()[1..])
        .await;

    let entries = ExportEntry::from_statuses(&statuses);
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("out").join("translations.zip");

    let names = export_to_file(&path, &entries).unwrap();

    // The failed write still exports its translation
    assert_eq!(names, vec!["translation_fr.json", "translation_de-DE.json"]);

    let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);

    let mut body = String::new();
    archive
        .by_name("translation_fr.json")
        .unwrap()
        .read_to_string(&mut body)
        .unwrap();
    let nodes: Vec<TranslatedNode> = serde_json::from_str(&body).unwrap();
    let expected: Vec<TranslatedNode> = extracted.into_iter().map(TranslatedNode::from).collect();
    assert_eq!(nodes, expected);
    assert!(body.contains("\n  {"), "entries should be pretty-printed");
}

#[test]
fn test_exportToFile_withNoEntries_shouldWriteEmptyArchive() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("empty.zip");

    let names = export_to_file(&path, &[]).unwrap();

    assert!(names.is_empty());
    let archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
    assert_eq!(archive.len(), 0);
}
