//! Document editor over a pod directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use grow_editor::{DocumentEditor, FieldWidget};
use grow_editor_api::PodEditorApi;
use serde_json::json;
use tempfile::TempDir;

const POD_PATH: &str = "/content/pages/home.yaml";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_pod() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "content/pages/_blueprint.yaml",
        "editor:\n  fields:\n    - type: text\n      key: $title\n      label: Title\n    - type: textarea\n      key: meta.description\n      label: Description\n    - type: partials\n      key: partials\n      label: Partials\n",
    );
    write(
        root,
        POD_PATH.trim_start_matches('/'),
        "$title: Blinkk\n$path: /\nmeta:\n  description: Something really cool.\npartials:\n  - partial: hero\n    title: Blinkk\n    cta:\n      url: !g.url /content/pages/projects.yaml\n  - partial: spacer\n    height: 40\n",
    );
    write(
        root,
        "partials/hero.yaml",
        "label: Hero\nfields:\n  - type: text\n    key: title\n    label: Hero Title\n",
    );
    tmp
}

#[tokio::test]
async fn edit_nested_partial_and_save() {
    let pod = sample_pod();
    let api = Arc::new(PodEditorApi::new(pod.path(), "en"));
    let mut editor = DocumentEditor::load(api.clone(), POD_PATH).await.unwrap();

    let Some(FieldWidget::Partials(field)) = editor.field_mut("partials") else {
        panic!("partials widget missing");
    };
    field
        .container_mut(0)
        .unwrap()
        .update(&json!({"title": "Blinkk Team"}))
        .unwrap();
    // `spacer` has no definition and is carried as-is.
    assert!(field.container_mut(1).is_none());

    editor.save(None).await.unwrap();

    let raw = fs::read_to_string(pod.path().join("content/pages/home.yaml")).unwrap();
    assert!(raw.contains("Blinkk Team"));
    assert!(raw.contains("!g.url"));
    assert!(raw.contains("spacer"));

    let reloaded = DocumentEditor::load(api, POD_PATH).await.unwrap();
    let fm = reloaded.front_matter().unwrap();
    assert_eq!(fm.get_str("partials.0.title"), Some("Blinkk Team"));
    assert_eq!(fm.get("partials.1.height"), Some(&json!(40)));
    assert_eq!(fm.get_str("meta.description"), Some("Something really cool."));
}

#[tokio::test]
async fn save_to_other_locale_leaves_default_file() {
    let pod = sample_pod();
    let api = Arc::new(PodEditorApi::new(pod.path(), "en"));
    let mut editor = DocumentEditor::load(api.clone(), POD_PATH).await.unwrap();

    editor.set("$title", json!("Blinkk DE")).unwrap();
    editor.save(Some("de")).await.unwrap();

    assert!(pod.path().join("content/pages/home@de.yaml").exists());
    let base = DocumentEditor::load(api, POD_PATH).await.unwrap();
    assert_eq!(base.field("$title").unwrap().value(), json!("Blinkk"));
}
