#![cfg(feature = "egui")]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Stroke};

use super::geometry::{MapTransform, polygon_contains};
use super::render;
use super::state::{NoticeKind, PlotMapApp, ViewMode};

const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
const MUTED_TEXT: Color32 = Color32::from_rgb(100, 116, 139);

/// Per-frame entry point, called from `eframe::App::update`.
pub(crate) fn update(app: &mut PlotMapApp, ctx: &egui::Context) {
    let events = app.worker.poll();
    for event in events {
        app.apply_event(ctx, event);
    }
    app.prune_notices(Instant::now());
    handle_dropped_files(app, ctx);

    egui::TopBottomPanel::top("title").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.heading(RichText::new("СНТ «Участки»").strong());
            ui.label(
                RichText::new("Интерактивная карта участков садового товарищества").weak(),
            );
            ui.add_space(8.0);
        });
    });

    egui::SidePanel::right("sidebar")
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(6.0);
                upload_card(app, ui);
                ui.add_space(10.0);
                info_card(app, ui);
                ui.add_space(10.0);
                stats_card(app, ui);
            });
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        map_card(app, ui);
    });

    draw_notices(app, ctx);

    if app.loading || app.uploading {
        ctx.request_repaint_after(Duration::from_millis(150));
    }
}

/// Feed window-level file drag-and-drop into the uploader. The hover flag
/// is visual only; a drop is ignored while a scheme is already set (the
/// drop zone is not shown then) or while an upload is in flight.
fn handle_dropped_files(app: &mut PlotMapApp, ctx: &egui::Context) {
    let (hovering, dropped) = ctx.input(|input| {
        (
            !input.raw.hovered_files.is_empty(),
            input.raw.dropped_files.clone(),
        )
    });
    app.drag_active = hovering;
    if app.scheme_url.is_some() {
        return;
    }
    if let Some(path) = dropped.into_iter().find_map(|file| file.path) {
        app.begin_upload(path);
    }
}

fn pick_scheme_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Изображения", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
        .pick_file()
}

// ────────────────────────────────────────────────────────────────────────────
// Map card
// ────────────────────────────────────────────────────────────────────────────

fn map_card(app: &mut PlotMapApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Карта участков СНТ").strong().size(16.0));
        // The toggle is only offered once a scheme has been uploaded.
        if app.scheme_url.is_some() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .selectable_label(app.view_mode == ViewMode::Scheme, "Загруженная карта")
                    .clicked()
                {
                    app.view_mode = ViewMode::Scheme;
                }
                if ui
                    .selectable_label(app.view_mode == ViewMode::Vector, "Схема")
                    .clicked()
                {
                    app.view_mode = ViewMode::Vector;
                }
            });
        }
    });
    ui.label(RichText::new("Наведите на участок для просмотра информации").weak());
    ui.separator();

    if app.loading {
        ui.centered_and_justified(|ui| {
            ui.label("Загрузка карты участков…");
        });
        return;
    }

    match app.view_mode {
        ViewMode::Scheme if app.scheme_url.is_some() => scheme_view(app, ui),
        _ => {
            vector_view(app, ui);
            legend(ui);
        }
    }
}

fn vector_view(app: &mut PlotMapApp, ui: &mut egui::Ui) {
    let legend_height = 40.0;
    let mut canvas = ui.available_rect_before_wrap();
    canvas.max.y = (canvas.max.y - legend_height).max(canvas.min.y + 120.0);
    let response = ui.allocate_rect(canvas, Sense::click());
    let painter = ui.painter_at(canvas);
    painter.rect_filled(canvas, 6.0, Color32::from_gray(250));

    let transform = MapTransform::fit(canvas, 16.0);
    render::draw_grid(&painter, &transform);

    let plots = app.renderable_plots();
    if plots.is_empty() {
        painter.text(
            canvas.center(),
            Align2::CENTER_CENTER,
            "Нет участков с координатами",
            FontId::proportional(14.0),
            MUTED_TEXT,
        );
        app.hovered = None;
        return;
    }

    // Hit test against the pointer; with overlapping polygons the one drawn
    // last (topmost) wins. No pointer means no hovered plot.
    let pointer = response.hover_pos();
    let mut screen_polygons: Vec<Vec<Pos2>> = Vec::with_capacity(plots.len());
    let mut hovered: Option<String> = None;
    for (plot, polygon) in &plots {
        let points: Vec<Pos2> = polygon.iter().map(|p| transform.to_screen(*p)).collect();
        if let Some(pos) = pointer {
            if polygon_contains(&points, pos) {
                hovered = Some(plot.id.clone());
            }
        }
        screen_polygons.push(points);
    }
    app.hovered = hovered;

    if response.clicked() {
        if let Some(id) = app.hovered.clone() {
            if let Some((plot, _)) = plots.iter().find(|(plot, _)| plot.id == id) {
                app.select(plot.clone());
            }
        }
    }

    let selected_id = app.selected.as_ref().map(|plot| plot.id.clone());
    for ((plot, polygon), points) in plots.iter().zip(screen_polygons) {
        let emphasized = app.hovered.as_deref() == Some(plot.id.as_str())
            || selected_id.as_deref() == Some(plot.id.as_str());
        render::draw_plot(&painter, &transform, plot, polygon, points, emphasized);
    }
}

fn legend(ui: &mut egui::Ui) {
    ui.add_space(6.0);
    ui.separator();
    ui.horizontal(|ui| {
        for (status, label) in render::legend_entries() {
            let (rect, _) = ui.allocate_exact_size(egui::Vec2::splat(14.0), Sense::hover());
            ui.painter().rect_filled(rect, 3.0, render::status_fill(status));
            ui.label(label);
            ui.add_space(10.0);
        }
    });
}

fn scheme_view(app: &mut PlotMapApp, ui: &mut egui::Ui) {
    let Some(url) = app.scheme_url.clone() else {
        return;
    };
    match &app.scheme_texture {
        Some(texture) => {
            let size = texture.size_vec2();
            let scale = (ui.available_width() / size.x)
                .min(500.0 / size.y)
                .min(1.0);
            let response = ui.add(egui::Image::new((texture.id(), size * scale)));

            // Overlay caption in the image's top-left corner.
            let painter = ui.painter();
            let title = painter.layout_no_wrap(
                "Загруженная схема участков".to_owned(),
                FontId::proportional(13.0),
                render::LABEL_COLOR,
            );
            let hint = painter.layout_no_wrap(
                "Переключитесь на «Схема» для интерактивной карты".to_owned(),
                FontId::proportional(11.0),
                MUTED_TEXT,
            );
            let width = title.size().x.max(hint.size().x);
            let height = title.size().y + hint.size().y + 12.0;
            let bg = egui::Rect::from_min_size(
                response.rect.min + egui::vec2(12.0, 12.0),
                egui::vec2(width + 16.0, height),
            );
            painter.rect_filled(bg, 6.0, Color32::from_rgba_unmultiplied(255, 255, 255, 230));
            let title_height = title.size().y;
            painter.galley(bg.min + egui::vec2(8.0, 4.0), title, render::LABEL_COLOR);
            painter.galley(
                bg.min + egui::vec2(8.0, 4.0 + title_height + 2.0),
                hint,
                MUTED_TEXT,
            );
        }
        None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Загрузка изображения схемы…");
            });
            ui.label(RichText::new(url).weak().small());
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sidebar cards
// ────────────────────────────────────────────────────────────────────────────

fn upload_card(app: &mut PlotMapApp, ui: &mut egui::Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("Схема участков").strong());
        ui.label(
            RichText::new("Загрузите изображение схемы участков для отображения на карте")
                .weak()
                .small(),
        );
        ui.add_space(6.0);

        if app.scheme_url.is_some() {
            if let Some(texture) = &app.scheme_texture {
                let size = texture.size_vec2();
                let scale = (ui.available_width() / size.x).min(150.0 / size.y).min(1.0);
                ui.add(egui::Image::new((texture.id(), size * scale)));
                ui.add_space(6.0);
            }
            ui.horizontal(|ui| {
                let replace = ui.add_enabled(!app.uploading, egui::Button::new("Заменить схему"));
                if replace.clicked() {
                    if let Some(path) = pick_scheme_file() {
                        app.begin_upload(path);
                    }
                }
                let remove = ui.add_enabled(!app.uploading, egui::Button::new("Удалить"));
                if remove.clicked() {
                    app.remove_scheme();
                }
            });
        } else {
            drop_zone(app, ui);
        }
    });
}

/// The click-or-drop target shown while no scheme is set.
fn drop_zone(app: &mut PlotMapApp, ui: &mut egui::Ui) {
    let stroke = if app.drag_active {
        Stroke::new(1.5, ACCENT)
    } else {
        Stroke::new(1.0, Color32::from_gray(200))
    };
    let frame = egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(14.0);
            let heading = if app.uploading {
                "Загрузка…"
            } else {
                "Загрузите схему участков"
            };
            ui.label(RichText::new(heading).strong());
            ui.label(RichText::new("Перетащите файл сюда или нажмите для выбора").weak());
            ui.label(
                RichText::new("Поддерживаются форматы: JPG, PNG, GIF (до 10 МБ)")
                    .weak()
                    .small(),
            );
            ui.add_space(14.0);
        });
    });
    let response = frame.response.interact(Sense::click());
    if response.clicked() && !app.uploading {
        if let Some(path) = pick_scheme_file() {
            app.begin_upload(path);
        }
    }
}

fn info_card(app: &mut PlotMapApp, ui: &mut egui::Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        match &app.selected {
            Some(plot) => {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("Участок №{}", plot.plot_number))
                            .strong()
                            .size(15.0),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        egui::Frame::new()
                            .fill(render::status_fill(plot.status))
                            .corner_radius(6.0)
                            .inner_margin(egui::Margin::symmetric(8, 3))
                            .show(ui, |ui| {
                                ui.label(
                                    RichText::new(plot.status.label_ru())
                                        .color(Color32::WHITE)
                                        .small(),
                                );
                            });
                    });
                });
                ui.add_space(4.0);
                if let Some(owner) = &plot.owner_name {
                    ui.label(RichText::new(owner).strong());
                }
                if let Some(phone) = &plot.owner_phone {
                    ui.label(phone);
                }
                if let Some(area) = plot.area_sqm {
                    ui.label(format!("{area} м²"));
                }
                if let Some(notes) = &plot.notes {
                    ui.add_space(4.0);
                    ui.label(RichText::new("Заметки:").strong());
                    ui.label(RichText::new(notes).weak());
                }
            }
            None => {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.label(
                        RichText::new("Выберите участок на карте для просмотра информации")
                            .weak(),
                    );
                    ui.add_space(20.0);
                });
            }
        }
    });
}

fn stats_card(app: &mut PlotMapApp, ui: &mut egui::Ui) {
    let stats = app.stats();
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("Статистика").strong());
        ui.add_space(4.0);
        stat_row(ui, "Всего участков:", stats.total);
        stat_row(ui, "Занятых:", stats.occupied);
        stat_row(ui, "Свободных:", stats.vacant);
        stat_row(ui, "Продается:", stats.for_sale);
    });
}

fn stat_row(ui: &mut egui::Ui, label: &str, value: usize) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value.to_string()).strong());
        });
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Notices
// ────────────────────────────────────────────────────────────────────────────

fn draw_notices(app: &PlotMapApp, ctx: &egui::Context) {
    if app.notices.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("notices"))
        .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for notice in &app.notices {
                let fill = match notice.kind {
                    NoticeKind::Success => Color32::from_rgb(22, 163, 74),
                    NoticeKind::Error => Color32::from_rgb(220, 38, 38),
                };
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&notice.text).color(Color32::WHITE));
                    });
                ui.add_space(6.0);
            }
        });
    // Keep repainting so expired notices disappear without input.
    ctx.request_repaint_after(Duration::from_millis(250));
}
