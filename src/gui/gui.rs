// gui.rs

use eframe::egui;
use egui::{Align2, Color32, FontId, Sense, Stroke, Vec2};
use egui_plot::{Line, Plot, PlotPoints};

use crate::audio_player::{AudioPlayer, GuitarConfig, Timbre};
use crate::fretboard::{classify, pattern_positions, LabelMode};
use crate::music_theory::{PitchClass, STANDARD_TUNING, STRING_COUNT};
use crate::scale::{is_pentatonic, scale_notes, IntervalTableLookup, ScaleId};
use crate::tuner::{Tuner, FRAME_SIZE};

const CELL_HEIGHT: f32 = 34.0;
const MARKER_ROW_HEIGHT: f32 = 18.0;
const FRET_MARKERS: [u8; 8] = [3, 5, 7, 9, 12, 15, 17, 19];

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum View {
    Fretboard,
    Tuner,
}

#[derive(Clone)]
pub struct Configs {
    pub root: PitchClass,
    pub scale: ScaleId,
    pub fret_count: u8,
    pub show_labels: bool,
    pub label_mode: LabelMode,
    pub play_audio: bool,
    pub dark_theme: bool,
    pub pattern_enabled: bool,
    pub pattern_offset: i32,
    pub volume: f32,
    pub guitar_configs: Vec<GuitarConfig>,
    pub active_guitar: usize,
}

impl Configs {
    pub fn new() -> Self {
        Self {
            root: PitchClass::new(0),
            scale: ScaleId::Major,
            fret_count: 20,
            show_labels: true,
            label_mode: LabelMode::Note,
            play_audio: false,
            dark_theme: true,
            pattern_enabled: false,
            pattern_offset: 0,
            volume: 0.5,
            guitar_configs: vec![
                GuitarConfig::acoustic(),
                GuitarConfig::electric(),
                GuitarConfig::nylon(),
                GuitarConfig::custom(),
            ],
            active_guitar: 0,
        }
    }

    pub fn active_guitar_config(&self) -> &GuitarConfig {
        &self.guitar_configs[self.active_guitar]
    }
}

struct Palette {
    border: Color32,
    default_bg: Color32,
    default_text: Color32,
    scale_bg: Color32,
    scale_dim_bg: Color32,
    scale_dim_text: Color32,
    root_bg: Color32,
    root_dim_bg: Color32,
    root_dim_text: Color32,
    marker: Color32,
    nut: Color32,
}

fn palette(dark: bool) -> Palette {
    if dark {
        Palette {
            border: Color32::from_gray(70),
            default_bg: Color32::from_gray(25),
            default_text: Color32::from_gray(90),
            scale_bg: Color32::from_rgb(37, 99, 235),
            scale_dim_bg: Color32::from_gray(45),
            scale_dim_text: Color32::from_gray(110),
            root_bg: Color32::from_rgb(220, 38, 38),
            root_dim_bg: Color32::from_rgb(90, 20, 20),
            root_dim_text: Color32::from_rgb(248, 113, 113),
            marker: Color32::from_gray(160),
            nut: Color32::from_gray(220),
        }
    } else {
        Palette {
            border: Color32::from_gray(200),
            default_bg: Color32::from_gray(243),
            default_text: Color32::from_gray(150),
            scale_bg: Color32::from_rgb(96, 165, 250),
            scale_dim_bg: Color32::from_gray(220),
            scale_dim_text: Color32::from_gray(160),
            root_bg: Color32::from_rgb(248, 113, 113),
            root_dim_bg: Color32::from_rgb(254, 226, 226),
            root_dim_text: Color32::from_rgb(239, 68, 68),
            marker: Color32::from_gray(120),
            nut: Color32::from_gray(60),
        }
    }
}

pub struct FretboardApp {
    view: View,
    configs: Configs,
    lookup: IntervalTableLookup,
    audio_player: Option<AudioPlayer>,
    audio_error: Option<String>,
    tuner: Option<Tuner>,
    tuner_error: Option<String>,
}

impl FretboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let configs = Configs::new();
        cc.egui_ctx.set_visuals(if configs.dark_theme {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        Self {
            view: View::Fretboard,
            configs,
            lookup: IntervalTableLookup,
            audio_player: None,
            audio_error: None,
            tuner: None,
            tuner_error: None,
        }
    }

    /// Lazily opens the output stream the first time audio is wanted.
    fn ensure_audio_player(&mut self) {
        if self.audio_player.is_some() || self.audio_error.is_some() {
            return;
        }
        match AudioPlayer::new() {
            Ok(player) => {
                player.set_volume(self.configs.volume);
                self.audio_player = Some(player);
            }
            Err(e) => self.audio_error = Some(e),
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mut key_changed = false;
        let mut changed_volume = false;

        ui.group(|ui| {
            ui.heading("Key and scale");
            egui::ComboBox::new("root_selection", "Key")
                .selected_text(self.configs.root.name())
                .show_ui(ui, |ui| {
                    for semitone in 0..12u8 {
                        let pc = PitchClass::new(semitone);
                        let checked = pc == self.configs.root;
                        if ui.selectable_label(checked, pc.name()).clicked() {
                            self.configs.root = pc;
                            key_changed = true;
                        }
                    }
                });
            egui::ComboBox::new("scale_selection", "Scale")
                .selected_text(self.configs.scale.to_string())
                .show_ui(ui, |ui| {
                    for id in ScaleId::ALL {
                        let checked = id == self.configs.scale;
                        if ui.selectable_label(checked, id.to_string()).clicked() {
                            self.configs.scale = id;
                            key_changed = true;
                        }
                    }
                });
            ui.horizontal(|ui| {
                ui.label("Frets:");
                ui.add(egui::Slider::new(&mut self.configs.fret_count, 1..=24));
            });
        });

        ui.group(|ui| {
            ui.heading("Labels");
            ui.checkbox(&mut self.configs.show_labels, "Show labels");
            ui.horizontal(|ui| {
                ui.radio_value(&mut self.configs.label_mode, LabelMode::Note, "Notes");
                ui.radio_value(&mut self.configs.label_mode, LabelMode::Degree, "Intervals");
            });
        });

        ui.group(|ui| {
            ui.heading("Pattern");
            ui.checkbox(&mut self.configs.pattern_enabled, "Overlay pattern");
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.configs.pattern_enabled, egui::Button::new("Lower"))
                    .clicked()
                {
                    self.configs.pattern_offset -= 1;
                }
                if ui
                    .add_enabled(self.configs.pattern_enabled, egui::Button::new("Raise"))
                    .clicked()
                {
                    self.configs.pattern_offset += 1;
                }
            });
        });

        ui.group(|ui| {
            ui.heading("Audio");
            ui.checkbox(&mut self.configs.play_audio, "Play clicked notes");
            ui.horizontal(|ui| {
                ui.label("Volume:");
                if ui
                    .add(egui::Slider::new(&mut self.configs.volume, 0.0..=1.0).step_by(0.01))
                    .changed()
                {
                    changed_volume = true;
                }
            });
            egui::ComboBox::new("guitar_selection", "Guitar")
                .selected_text(self.configs.active_guitar_config().timbre.to_string())
                .show_ui(ui, |ui| {
                    for (index, guitar) in self.configs.guitar_configs.iter().enumerate() {
                        let checked = index == self.configs.active_guitar;
                        if ui
                            .selectable_label(checked, guitar.timbre.to_string())
                            .clicked()
                        {
                            self.configs.active_guitar = index;
                        }
                    }
                });

            if self.configs.active_guitar_config().timbre == Timbre::Custom {
                let custom = &mut self.configs.guitar_configs[self.configs.active_guitar];
                egui::Grid::new("custom_guitar_config")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Decay:");
                        ui.add(egui::Slider::new(&mut custom.decay, 0.9..=1.0).step_by(0.001));
                        ui.end_row();

                        ui.label("String damping:");
                        ui.add(
                            egui::Slider::new(&mut custom.string_damping, 0.0..=1.0)
                                .step_by(0.001),
                        );
                        ui.end_row();

                        ui.label("Body resonance:");
                        ui.add(
                            egui::Slider::new(&mut custom.body_resonance, 0.0..=500.0)
                                .step_by(0.1),
                        );
                        ui.end_row();

                        ui.label("Body damping:");
                        ui.add(
                            egui::Slider::new(&mut custom.body_damping, 0.0..=1.0).step_by(0.001),
                        );
                        ui.end_row();

                        ui.label("String tension:");
                        ui.add(
                            egui::Slider::new(&mut custom.string_tension, 0.0..=1.0)
                                .step_by(0.001),
                        );
                        ui.end_row();
                    });
            }

            if let Some(error) = &self.audio_error {
                ui.colored_label(Color32::LIGHT_RED, format!("Audio unavailable: {}", error));
            }
        });

        ui.group(|ui| {
            ui.heading("Theme");
            if ui
                .checkbox(&mut self.configs.dark_theme, "Dark theme")
                .changed()
            {
                ctx.set_visuals(if self.configs.dark_theme {
                    egui::Visuals::dark()
                } else {
                    egui::Visuals::light()
                });
            }
        });

        // A new key or scale invalidates the held pattern position.
        if key_changed {
            self.configs.pattern_offset = 0;
        }
        if changed_volume {
            if let Some(player) = &self.audio_player {
                player.set_volume(self.configs.volume);
            }
        }
    }

    fn show_fretboard(&mut self, ui: &mut egui::Ui) {
        let configs = &self.configs;
        let notes = scale_notes(configs.root.name(), configs.scale, &self.lookup)
            .unwrap_or_else(|_| vec![configs.root]);
        let pentatonic = is_pentatonic(configs.scale, &notes);
        let positions = pattern_positions(
            &notes,
            pentatonic,
            configs.pattern_enabled,
            configs.pattern_offset,
            configs.fret_count,
        );
        let colors = palette(configs.dark_theme);

        let columns = configs.fret_count as usize + 1;
        let grid_width = ui.available_width();
        let grid_height = STRING_COUNT as f32 * CELL_HEIGHT;
        let desired_size = Vec2::new(grid_width, grid_height + MARKER_ROW_HEIGHT);

        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());
        let painter = ui.painter_at(rect);
        let cell_width = grid_width / columns as f32;

        for row in 0..STRING_COUNT {
            // Draw the high string on top, as a player faces the neck.
            let string_idx = STRING_COUNT - 1 - row;
            let y = rect.min.y + row as f32 * CELL_HEIGHT;

            for fret in 0..=configs.fret_count {
                let x = rect.min.x + fret as f32 * cell_width;
                let cell_rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    Vec2::new(cell_width, CELL_HEIGHT),
                )
                .shrink(1.0);

                let cell = classify(string_idx, fret, configs.root, &notes, configs.label_mode);
                let in_pattern = positions[string_idx].contains(&fret);
                let is_open = fret == 0;

                let (fill, text_color) = if configs.pattern_enabled {
                    if cell.is_root && in_pattern {
                        (colors.root_bg, Color32::WHITE)
                    } else if cell.is_root {
                        (colors.root_dim_bg, colors.root_dim_text)
                    } else if in_pattern {
                        (colors.scale_bg, Color32::WHITE)
                    } else if cell.is_in_scale && !is_open {
                        (colors.scale_dim_bg, colors.scale_dim_text)
                    } else {
                        (colors.default_bg, colors.default_text)
                    }
                } else if cell.is_root {
                    (colors.root_bg, Color32::WHITE)
                } else if cell.is_in_scale && !is_open {
                    (colors.scale_bg, Color32::WHITE)
                } else {
                    (colors.default_bg, colors.default_text)
                };

                if is_open {
                    // Open strings render as circles left of the nut.
                    let radius = (cell_width.min(CELL_HEIGHT) * 0.38).min(14.0);
                    painter.circle_filled(cell_rect.center(), radius, fill);
                    painter.circle_stroke(cell_rect.center(), radius, Stroke::new(1.0, colors.border));
                } else {
                    painter.rect_filled(cell_rect, 3.0, fill);
                    painter.rect_stroke(cell_rect, 3.0, Stroke::new(1.0, colors.border));
                }

                if configs.show_labels {
                    if let Some(label) = &cell.label {
                        painter.text(
                            cell_rect.center(),
                            Align2::CENTER_CENTER,
                            label,
                            FontId::monospace(12.0),
                            text_color,
                        );
                    }
                }
            }
        }

        // Nut after the open-string column, a thinner line at the octave.
        let nut_x = rect.min.x + cell_width;
        painter.line_segment(
            [
                egui::pos2(nut_x, rect.min.y),
                egui::pos2(nut_x, rect.min.y + grid_height),
            ],
            Stroke::new(3.0, colors.nut),
        );
        if configs.fret_count >= 12 {
            let octave_x = rect.min.x + 12.0 * cell_width;
            painter.line_segment(
                [
                    egui::pos2(octave_x, rect.min.y),
                    egui::pos2(octave_x, rect.min.y + grid_height),
                ],
                Stroke::new(1.5, colors.nut),
            );
        }

        // Inlay dots under the marker frets, doubled at the octave.
        let marker_y = rect.min.y + grid_height + MARKER_ROW_HEIGHT * 0.5;
        for marker in FRET_MARKERS {
            if marker > configs.fret_count {
                continue;
            }
            let x = rect.min.x + (marker as f32 + 0.5) * cell_width;
            if marker == 12 {
                painter.circle_filled(egui::pos2(x - 5.0, marker_y), 3.0, colors.marker);
                painter.circle_filled(egui::pos2(x + 5.0, marker_y), 3.0, colors.marker);
            } else {
                painter.circle_filled(egui::pos2(x, marker_y), 3.0, colors.marker);
            }
        }

        if response.clicked() && self.configs.play_audio {
            if let Some(pos) = response.interact_pointer_pos() {
                let fret = ((pos.x - rect.min.x) / cell_width) as i32;
                let row = ((pos.y - rect.min.y) / CELL_HEIGHT) as i32;
                if (0..=self.configs.fret_count as i32).contains(&fret)
                    && (0..STRING_COUNT as i32).contains(&row)
                {
                    let string_idx = STRING_COUNT - 1 - row as usize;
                    let pitch = STANDARD_TUNING[string_idx].at_fret(fret as u8);
                    self.ensure_audio_player();
                    if let Some(player) = &self.audio_player {
                        player.pluck(pitch, self.configs.active_guitar_config());
                    }
                }
            }
        }
    }

    fn show_tuner(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let running = self.tuner.is_some();
        let button_label = if running { "Stop Tuner" } else { "Start Tuner" };
        if ui.button(button_label).clicked() {
            if running {
                self.tuner = None;
            } else {
                self.tuner_error = None;
                match Tuner::new().and_then(|mut tuner| {
                    tuner.start()?;
                    Ok(tuner)
                }) {
                    Ok(tuner) => self.tuner = Some(tuner),
                    Err(e) => self.tuner_error = Some(e),
                }
            }
        }

        if let Some(error) = &self.tuner_error {
            ui.colored_label(Color32::LIGHT_RED, format!("Tuner unavailable: {}", error));
        }

        let tuner = match &self.tuner {
            Some(tuner) => tuner,
            None => return,
        };

        let reading = tuner.reading.lock().unwrap().clone();

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            match &reading {
                Some(reading) => {
                    ui.label(egui::RichText::new(reading.note).font(FontId::proportional(64.0)));
                    let cents_text = if reading.cents > 0 {
                        format!("+{}\u{00a2}", reading.cents)
                    } else if reading.cents < 0 {
                        format!("{}\u{00a2}", reading.cents)
                    } else {
                        "0\u{00a2}".to_owned()
                    };
                    ui.label(format!("{}  ({:.1} Hz)", cents_text, reading.frequency));
                }
                None => {
                    ui.label(egui::RichText::new("\u{2013}").font(FontId::proportional(64.0)));
                    ui.label("no signal");
                }
            }

            // Needle over a ±50 cent bar.
            let (bar_rect, _) =
                ui.allocate_exact_size(Vec2::new(260.0, 16.0), Sense::hover());
            let painter = ui.painter_at(bar_rect);
            painter.rect_filled(bar_rect, 4.0, Color32::from_gray(60));
            painter.line_segment(
                [bar_rect.center_top(), bar_rect.center_bottom()],
                Stroke::new(1.0, Color32::from_gray(120)),
            );
            if let Some(reading) = &reading {
                let frac = 0.5 + (reading.cents.clamp(-50, 50) as f32) / 100.0;
                let x = bar_rect.min.x + frac * bar_rect.width();
                painter.line_segment(
                    [
                        egui::pos2(x, bar_rect.min.y),
                        egui::pos2(x, bar_rect.max.y),
                    ],
                    Stroke::new(2.0, Color32::WHITE),
                );
            }
            ui.horizontal(|ui| {
                ui.label("-50\u{00a2}");
                ui.add_space(90.0);
                ui.label("0\u{00a2}");
                ui.add_space(90.0);
                ui.label("+50\u{00a2}");
            });
        });

        ui.add_space(12.0);
        ui.heading("Input signal");
        {
            let waveform_hist = tuner.waveform_history.lock().unwrap();
            if let Some(waveform) = waveform_hist.last() {
                let points: PlotPoints = waveform
                    .iter()
                    .enumerate()
                    .map(|(i, &y)| [i as f64, y as f64])
                    .collect();
                Plot::new("tuner_waveform")
                    .height(120.0)
                    .include_y(-1.1)
                    .include_y(1.1)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(points).name("Waveform"));
                    });
            } else {
                ui.label("No signal captured yet.");
            }
        }

        ui.heading("Spectrum");
        {
            let spectrum_hist = tuner.spectrum_history.lock().unwrap();
            if let Some(spectrum) = spectrum_hist.last() {
                let bin_hz = tuner.sample_rate as f64 / FRAME_SIZE as f64;
                let points: PlotPoints = spectrum
                    .iter()
                    .enumerate()
                    .take_while(|(i, _)| *i as f64 * bin_hz <= 2000.0)
                    .map(|(i, &y)| [i as f64 * bin_hz, y as f64])
                    .collect();
                Plot::new("tuner_spectrum")
                    .height(120.0)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(points).name("Magnitude"));
                    });
            } else {
                ui.label("No spectrum yet.");
            }
        }

        // Keep polling the shared state while the capture runs.
        ctx.request_repaint();
    }
}

impl eframe::App for FretboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("mode_toggle").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .selectable_label(self.view == View::Fretboard, "Fretboard")
                    .clicked()
                {
                    self.view = View::Fretboard;
                }
                if ui
                    .selectable_label(self.view == View::Tuner, "Tuner")
                    .clicked()
                {
                    self.view = View::Tuner;
                }
            });
        });

        match self.view {
            View::Fretboard => {
                egui::SidePanel::left("controls_panel").show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.show_controls(ui, ctx);
                    });
                });
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Fretboard Mode Explorer");
                    ui.add_space(8.0);
                    self.show_fretboard(ui);
                });
            }
            View::Tuner => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.show_tuner(ui, ctx);
                });
            }
        }
    }
}
