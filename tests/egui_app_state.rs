#![cfg(feature = "egui")]

use std::io::Write;

use plotmap::config::RemoteConfig;
use plotmap::egui_app::{DecodedImage, PlotMapApp, TaggedEvent, ViewMode, WorkerEvent};
use plotmap::model::{Plot, PlotCoordinates, PlotStatus};

fn test_config() -> RemoteConfig {
    RemoteConfig {
        base_url: "http://127.0.0.1:1".into(),
        api_key: "test-key".into(),
        table: "land_plots".into(),
        bucket: "plot-schemes".into(),
    }
}

fn plot(id: &str, number: &str, points: Option<&str>) -> Plot {
    Plot {
        id: id.into(),
        plot_number: number.into(),
        owner_name: None,
        owner_phone: None,
        owner_email: None,
        area_sqm: None,
        status: PlotStatus::Occupied,
        coordinates: points.map(|p| PlotCoordinates { points: Some(p.into()) }),
        notes: None,
    }
}

fn detached_app(ctx: &egui::Context) -> PlotMapApp {
    PlotMapApp::detached(test_config(), ctx)
}

#[test]
fn test_fetch_success_replaces_plot_list() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    app.apply_event(
        &ctx,
        TaggedEvent {
            generation: 0,
            event: WorkerEvent::PlotsLoaded(Ok(vec![plot("a", "1", Some("0,0 10,0 10,10"))])),
        },
    );
    assert_eq!(app.plots.len(), 1);
    assert!(!app.loading);
    assert!(app.notices.is_empty());
}

#[test]
fn test_fetch_failure_leaves_list_empty_and_notifies() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    app.loading = true;
    app.apply_event(
        &ctx,
        TaggedEvent {
            generation: 0,
            event: WorkerEvent::PlotsLoaded(Err("connection refused".into())),
        },
    );
    assert!(app.plots.is_empty());
    assert!(!app.loading);
    assert_eq!(app.notices.len(), 1);
    assert_eq!(app.notices[0].text, "Ошибка загрузки данных участков");
}

#[test]
fn test_stale_fetch_result_is_discarded() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    // Two fetches in flight; only the newest generation may apply.
    app.worker.spawn_fetch();
    app.worker.spawn_fetch();
    app.apply_event(
        &ctx,
        TaggedEvent {
            generation: 1,
            event: WorkerEvent::PlotsLoaded(Ok(vec![plot("old", "1", None)])),
        },
    );
    assert!(app.plots.is_empty());
    app.apply_event(
        &ctx,
        TaggedEvent {
            generation: 2,
            event: WorkerEvent::PlotsLoaded(Ok(vec![plot("new", "2", None)])),
        },
    );
    assert_eq!(app.plots.len(), 1);
    assert_eq!(app.plots[0].id, "new");
}

#[test]
fn test_plot_without_points_is_not_renderable() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    app.plots = vec![
        plot("a", "1", Some("0,0 10,0 10,10")),
        plot("b", "2", None),
        plot("c", "3", Some("")),
    ];
    let renderable = app.renderable_plots();
    assert_eq!(renderable.len(), 1);
    assert_eq!(renderable[0].0.id, "a");
}

#[test]
fn test_selection_is_replaced_entirely() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    let first = plot("a", "1", None);
    let second = plot("b", "2", None);
    app.select(first);
    assert_eq!(app.selected.as_ref().unwrap().id, "a");
    app.select(second);
    assert_eq!(app.selected.as_ref().unwrap().id, "b");
}

#[test]
fn test_upload_success_sets_scheme_url_once() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    app.uploading = true;
    app.apply_event(
        &ctx,
        TaggedEvent {
            generation: 0,
            event: WorkerEvent::SchemeUploaded(Ok(
                "http://127.0.0.1:1/storage/v1/object/public/plot-schemes/scheme-1.png".into(),
            )),
        },
    );
    assert!(!app.uploading);
    let url = app.scheme_url.clone().unwrap();
    assert!(!url.is_empty());
    assert_eq!(app.notices.len(), 1);
    assert_eq!(app.notices[0].text, "Схема участков успешно загружена");
    // The image download for the texture was kicked off.
    assert_eq!(app.worker.image_generation(), 1);
}

#[test]
fn test_upload_failure_preserves_previous_scheme() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    app.scheme_url = Some("http://example/old.png".into());
    app.uploading = true;
    app.apply_event(
        &ctx,
        TaggedEvent {
            generation: 0,
            event: WorkerEvent::SchemeUploaded(Err("storage unavailable".into())),
        },
    );
    assert!(!app.uploading);
    assert_eq!(app.scheme_url.as_deref(), Some("http://example/old.png"));
    assert_eq!(app.notices[0].text, "Ошибка загрузки схемы");
}

#[test]
fn test_remove_scheme_clears_url_and_mode() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    app.scheme_url = Some("http://example/scheme.png".into());
    app.view_mode = ViewMode::Scheme;
    app.remove_scheme();
    assert!(app.scheme_url.is_none());
    assert!(app.scheme_texture.is_none());
    assert_eq!(app.view_mode, ViewMode::Vector);
    assert_eq!(app.notices[0].text, "Схема удалена");
}

#[test]
fn test_oversized_upload_is_rejected_without_network() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    let file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    file.as_file().set_len(11 * 1024 * 1024).unwrap();
    app.begin_upload(file.path().to_path_buf());
    assert!(!app.uploading);
    // No worker spawned: the request was never sent.
    assert_eq!(app.worker.upload_generation(), 0);
    assert_eq!(app.notices[0].text, "Размер файла не должен превышать 10 МБ");
}

#[test]
fn test_non_image_upload_is_rejected() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "not an image").unwrap();
    app.begin_upload(file.path().to_path_buf());
    assert!(!app.uploading);
    assert_eq!(app.worker.upload_generation(), 0);
    assert_eq!(app.notices[0].text, "Пожалуйста, выберите изображение");
}

#[test]
fn test_valid_upload_starts_worker() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.as_file().set_len(2 * 1024 * 1024).unwrap();
    app.begin_upload(file.path().to_path_buf());
    assert!(app.uploading);
    assert_eq!(app.worker.upload_generation(), 1);
    assert!(app.notices.is_empty());
}

#[test]
fn test_scheme_image_for_current_url_becomes_texture() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    app.scheme_url = Some("http://example/scheme.png".into());
    app.apply_event(
        &ctx,
        TaggedEvent {
            generation: 0,
            event: WorkerEvent::SchemeImageLoaded {
                url: "http://example/scheme.png".into(),
                result: Ok(DecodedImage {
                    width: 2,
                    height: 2,
                    rgba: vec![255; 16],
                }),
            },
        },
    );
    assert!(app.scheme_texture.is_some());
}

#[test]
fn test_scheme_image_for_replaced_url_is_ignored() {
    let ctx = egui::Context::default();
    let mut app = detached_app(&ctx);
    app.scheme_url = Some("http://example/new.png".into());
    app.apply_event(
        &ctx,
        TaggedEvent {
            generation: 0,
            event: WorkerEvent::SchemeImageLoaded {
                url: "http://example/old.png".into(),
                result: Ok(DecodedImage {
                    width: 2,
                    height: 2,
                    rgba: vec![255; 16],
                }),
            },
        },
    );
    assert!(app.scheme_texture.is_none());
}
