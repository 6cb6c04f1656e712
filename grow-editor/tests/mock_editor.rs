//! Document editor over the sample backend.

use std::sync::Arc;

use grow_editor::{DocumentEditor, EditorError, FieldWidget, PartialItem, Partials};
use grow_editor_api::{EditorApi, MockEditorApi};
use grow_editor_fields::FieldType;
use serde_json::json;

const POD_PATH: &str = "/content/pages/home.yaml";

fn api() -> Arc<dyn EditorApi> {
    Arc::new(MockEditorApi::new())
}

#[tokio::test]
async fn load_builds_widget_per_field() {
    let editor = DocumentEditor::load(api(), POD_PATH).await.unwrap();

    let keys: Vec<_> = editor.fields().iter().map(|f| f.key()).collect();
    assert_eq!(keys, ["$path", "$title", "meta.description", "partials"]);
    assert_eq!(editor.field("$title").unwrap().value(), json!("Blinkk"));
    assert_eq!(editor.field("$path").unwrap().label(), "Serving Path");
    assert_eq!(
        editor.field("meta.description").unwrap().value(),
        json!("Something really cool.")
    );
    assert_eq!(editor.serving_paths()["en"], "/");
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn partials_field_holds_hero_container() {
    let editor = DocumentEditor::load(api(), POD_PATH).await.unwrap();

    let Some(FieldWidget::Partials(field)) = editor.field("partials") else {
        panic!("partials widget missing");
    };
    assert_eq!(field.items().len(), 1);
    let PartialItem::Container(hero) = &field.items()[0] else {
        panic!("hero should resolve to a container");
    };
    assert_eq!(hero.display_label(), "Partial: Hero");
    assert_eq!(hero.field("subtitle").unwrap().value(), json!("New to Blinkk?"));
    assert_eq!(hero.field("title").unwrap().field_type(), FieldType::Text);
    assert_eq!(hero.value()["partial"], "hero");
}

#[tokio::test]
async fn unedited_front_matter_round_trips() {
    let editor = DocumentEditor::load(api(), POD_PATH).await.unwrap();
    let front_matter = editor.front_matter().unwrap().into_map();
    assert_eq!(front_matter, MockEditorApi::sample_document().front_matter);
}

#[tokio::test]
async fn save_rebinds_to_returned_front_matter() {
    let mut editor = DocumentEditor::load(api(), POD_PATH).await.unwrap();
    editor.set("$title", json!("Blinkk Team")).unwrap();
    assert!(editor.is_dirty());

    let saved = editor.save(None).await.unwrap();
    assert_eq!(saved.front_matter["$title"], "Blinkk Team");
    assert_eq!(editor.field("$path").unwrap().value(), json!("/something"));
    assert_eq!(
        editor.field("meta.description").unwrap().value(),
        json!("Something really really cool.")
    );
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn shared_partials_serve_several_documents() {
    let api = api();
    let partials = Partials::new(Arc::clone(&api), POD_PATH);

    let first = DocumentEditor::load_with(Arc::clone(&api), &partials, POD_PATH)
        .await
        .unwrap();
    assert!(partials.is_resolved());
    let second = DocumentEditor::load_with(api, &partials, POD_PATH)
        .await
        .unwrap();
    assert_eq!(first.definitions(), second.definitions());
}

#[tokio::test]
async fn text_widget_rejects_mapping() {
    let mut editor = DocumentEditor::load(api(), POD_PATH).await.unwrap();
    let err = editor.set("$title", json!({"en": "Blinkk"})).unwrap_err();
    assert!(matches!(err, EditorError::InvalidValue { .. }));
}
