// ui.rs - Control bar, board texture and mouse editing

use eframe::egui;
use egui::{Color32, ColorImage, Rect, Sense, TextureOptions, Vec2, pos2};

use crate::TrailLife;

impl eframe::App for TrailLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_pause();
        }
        self.advance();

        // Upload the frame. The buffer is premultiplied, so trail pixels with
        // zero alpha are added onto the black background
        self.simulation.draw(&mut self.pixels);
        let size = [self.simulation.visible_width(), self.simulation.visible_height()];
        let image = ColorImage::from_rgba_premultiplied(size, &self.pixels);
        let texture = match &mut self.texture {
            Some(texture) => {
                texture.set(image, TextureOptions::NEAREST);
                texture.id()
            }
            None => {
                let texture = ctx.load_texture("board", image, TextureOptions::NEAREST);
                let id = texture.id();
                self.texture = Some(texture);
                id
            }
        };

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let button_text = if self.simulation.is_paused() { "▶ Run" } else { "⏸ Pause" };
                if ui.button(button_text).clicked() {
                    self.toggle_pause();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomise();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                let selected = self
                    .patterns
                    .get(self.selected_pattern)
                    .map(|pattern| pattern.name.clone())
                    .unwrap_or_default();
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in self.patterns.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name.as_str());
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.simulation.generation()));
                ui.label(format!("Live cells: {}", self.simulation.grid().population()));
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let board = Vec2::new(size[0] as f32, size[1] as f32) * self.scale;
                let (response, painter) = ui.allocate_painter(board, Sense::click_and_drag());
                painter.image(
                    texture,
                    response.rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );

                // Left paints, right erases, only while paused
                if self.simulation.is_paused() {
                    let (paint, erase) =
                        ctx.input(|i| (i.pointer.primary_down(), i.pointer.secondary_down()));
                    if let (Some(pos), true) = (response.hover_pos(), paint || erase) {
                        let cell = (pos - response.rect.min) / self.scale;
                        if cell.x >= 0.0 && cell.y >= 0.0 {
                            self.simulation.paint(cell.x as usize, cell.y as usize, paint);
                            ctx.request_repaint();
                        }
                    }
                }
            });

        // Keep stepping while running
        if !self.simulation.is_paused() {
            ctx.request_repaint();
        }
    }
}
