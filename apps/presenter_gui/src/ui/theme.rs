//! Executive palette and the painted widgets shared across sections.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub navy: egui::Color32,
    pub royal_blue: egui::Color32,
    pub gold: egui::Color32,
    pub background: egui::Color32,
    pub card: egui::Color32,
    pub card_border: egui::Color32,
    pub text: egui::Color32,
    pub muted_text: egui::Color32,
    pub success: egui::Color32,
}

impl Palette {
    pub fn executive() -> Self {
        Self {
            navy: egui::Color32::from_rgb(26, 54, 93),
            royal_blue: egui::Color32::from_rgb(43, 119, 173),
            gold: egui::Color32::from_rgb(212, 175, 55),
            background: egui::Color32::from_rgb(248, 250, 252),
            card: egui::Color32::WHITE,
            card_border: egui::Color32::from_rgb(226, 232, 240),
            text: egui::Color32::from_rgb(30, 41, 59),
            muted_text: egui::Color32::from_rgb(100, 116, 139),
            success: egui::Color32::from_rgb(16, 185, 129),
        }
    }
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn mix_color(from: egui::Color32, to: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| -> u8 {
        (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
        mix(from.a(), to.a()),
    )
}

pub fn executive_visuals(palette: Palette) -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.override_text_color = Some(palette.text);
    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.card;
    visuals.extreme_bg_color = lighten_color(palette.card_border, 0.5);
    visuals.faint_bg_color = lighten_color(palette.card_border, 0.7);
    visuals.hyperlink_color = palette.royal_blue;
    visuals.selection.bg_fill = palette.royal_blue;
    visuals.window_corner_radius = egui::CornerRadius::same(12);
    visuals.menu_corner_radius = egui::CornerRadius::same(8);
    visuals.window_stroke = egui::Stroke::new(1.0, palette.card_border);

    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, palette.card_border);
    visuals.widgets.inactive.bg_fill = palette.navy;
    visuals.widgets.inactive.weak_bg_fill = palette.navy;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    visuals.widgets.hovered.bg_fill = palette.royal_blue;
    visuals.widgets.hovered.weak_bg_fill = palette.royal_blue;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    visuals.widgets.active.bg_fill = palette.gold;
    visuals.widgets.active.weak_bg_fill = palette.gold;
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = egui::CornerRadius::same(8);
    }

    visuals
}

pub fn executive_style(base: &egui::Style, palette: Palette) -> egui::Style {
    let mut style = base.clone();
    style.visuals = executive_visuals(palette);
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.interact_size = egui::vec2(40.0, 30.0);
    style
}

/// Painted navigation row. `glow` in 0..=1 adds a fading gold outline after
/// the row was used to navigate.
pub fn nav_row(
    ui: &mut egui::Ui,
    palette: Palette,
    label: &str,
    selected: bool,
    glow: f32,
) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 38.0), egui::Sense::click());

    let fill = if selected {
        lighten_color(palette.royal_blue, 0.2)
    } else if response.hovered() {
        lighten_color(palette.navy, 0.2)
    } else {
        palette.navy
    };
    let radius = egui::CornerRadius::same(8);
    ui.painter().rect_filled(rect, radius, fill);

    if glow > 0.0 {
        ui.painter().rect_stroke(
            rect.expand(2.0 * glow),
            radius,
            egui::Stroke::new(2.0, palette.gold.gamma_multiply(glow)),
            egui::StrokeKind::Outside,
        );
    } else if selected {
        ui.painter().rect_stroke(
            rect,
            radius,
            egui::Stroke::new(1.0, palette.gold),
            egui::StrokeKind::Middle,
        );
    }

    let text_color = if selected {
        egui::Color32::WHITE
    } else {
        lighten_color(palette.card_border, 0.3)
    };
    ui.painter().text(
        egui::pos2(rect.left() + 14.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        egui::TextStyle::Button.resolve(ui.style()),
        text_color,
    );

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Card frame that lifts while hovered and can be clicked as a whole.
/// `reveal` in 0..=1 fades and slides the card in.
pub fn card<R>(
    ui: &mut egui::Ui,
    palette: Palette,
    id: egui::Id,
    reveal: f32,
    highlight: f32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    const LIFT: f32 = 6.0;
    const SLIDE: f32 = 16.0;

    let hovered = ui.data(|d| d.get_temp::<bool>(id)).unwrap_or(false);
    let lift = ui.ctx().animate_bool_with_time(id.with("lift"), hovered, 0.25);

    let border = mix_color(
        mix_color(palette.card_border, palette.royal_blue, lift),
        palette.gold,
        highlight,
    );
    let frame = egui::Frame::NONE
        .fill(palette.card)
        .stroke(egui::Stroke::new(1.0 + lift + highlight, border))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(16, 14));

    let inner = ui.scope_builder(
        egui::UiBuilder::new()
            .id_salt(id)
            .sense(egui::Sense::click()),
        |ui| {
            ui.multiply_opacity(reveal);
            ui.add_space(LIFT * (1.0 - lift) + SLIDE * (1.0 - reveal));
            let inner = frame.show(ui, add_contents).inner;
            ui.add_space(LIFT * lift + SLIDE * reveal);
            inner
        },
    );

    let contains_pointer = inner.response.contains_pointer();
    ui.data_mut(|d| d.insert_temp(id, contains_pointer));
    inner
}

pub fn chip(ui: &mut egui::Ui, palette: Palette, text: &str) -> egui::Response {
    let frame = egui::Frame::NONE
        .fill(lighten_color(palette.royal_blue, 0.85))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 3));
    frame
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().color(palette.navy))
        })
        .inner
}
