use insta::{assert_json_snapshot, assert_snapshot};
use serde_json::json;

use invitation_core::{fields_for_sections, EditorSession, LocaleDateFormatter};
use invitation_domain::{FieldValue, ProgressiveData, SectionId, TemplateDefinition};
use invitation_storage_json::JsonSessionStore;
use invitation_studio::{init, utils::templates::demo_template};

fn juan_y_ana() -> EditorSession {
    let mut session = EditorSession::for_template(&demo_template());
    session.update_field("groom_name", "Juan".into());
    session.update_field("bride_name", "Ana".into());
    session.update_field("weddingDate", "2024-12-15T16:00".into());
    session
}

#[test]
fn reference_invitation_renders_computed_fields() {
    init();

    let props = juan_y_ana().merged_props();
    let summary = format!(
        "{} | {} | {}",
        props.hero.couple_names, props.hero.event_date, props.footer.event_date
    );

    assert_snapshot!(summary, @"Juan & Ana | domingo, 15 de diciembre de 2024 | DOMINGO, 15 DE DICIEMBRE DE 2024");
    assert_json_snapshot!(props.footer, @r###"
    {
      "coupleNames": "Juan & Ana",
      "eventDate": "DOMINGO, 15 DE DICIEMBRE DE 2024",
      "message": "¡Te esperamos!",
      "hashtag": "#CarlosYMaria"
    }
    "###);
}

#[test]
fn untouched_fields_keep_template_defaults() {
    let session = juan_y_ana();
    let props = session.merged_props();

    assert_eq!(props.hero.image_url, "/images/templates/hero-1.jpg");
    assert_eq!(props.hero.location, "Hacienda Los Olivos, Lima");
    assert_eq!(props.gallery.images.len(), 6);
    let events: Vec<&str> = props
        .itinerary
        .events
        .iter()
        .map(|event| event.name.as_str())
        .collect();
    assert_eq!(events, vec!["Ceremonia", "Recepción"]);
}

#[test]
fn english_locale_formats_dates_in_english() {
    let props = juan_y_ana().merged_props_with(&LocaleDateFormatter::for_locale_tag("en-US"));
    assert_eq!(props.hero.event_date, "Sunday, December 15, 2024");
}

#[test]
fn authored_template_flows_through_to_props() {
    let template: TemplateDefinition = serde_json::from_value(json!({
        "id": "tpl-mar",
        "name": "Mar",
        "sectionsConfig": {"hero": true, "gallery_2": true, "story": true},
        "templateProps": {
            "hero": {"location": "Máncora"}
        },
        "componentDefaults": {
            "gallery_2": {"gallery_title": "Recuerdos"}
        },
        "templateData": {
            "story_moment_1_title": "La playa",
            "story_moment_1_description": "Donde empezó todo",
            "dress_code": "Blanco"
        }
    }))
    .expect("template json");

    let session = EditorSession::for_template(&template);
    assert_eq!(
        session.active_sections(),
        &[SectionId::Hero, SectionId::Story, SectionId::Gallery]
    );

    let props = session.merged_props();
    assert_eq!(props.hero.location, "Máncora");
    assert_eq!(props.gallery.title, "Recuerdos");
    assert_eq!(props.story.moments[0].title, "La playa");

    let flat = session.merged_data(&LocaleDateFormatter::default());
    assert_eq!(flat["dress_code"], json!("Blanco"));
}

#[test]
fn saved_sessions_restore_through_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonSessionStore::new(dir.path().join("sessions")).expect("store");

    let session = juan_y_ana();
    store
        .save("boda", &session.progressive_data())
        .expect("save session");

    let loaded: ProgressiveData = store.load("boda").expect("load session");
    let fields = fields_for_sections(session.active_sections());
    let restored = EditorSession::restore(fields, &demo_template(), &loaded);

    assert_eq!(restored.merged_props(), session.merged_props());
    assert_eq!(
        restored.get_field_value("groom_name"),
        Some(&FieldValue::text("Juan"))
    );
}
