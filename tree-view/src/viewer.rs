//! Interactive tree traversal viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`PlaybackController`] and
//! implements [`eframe::App`] to render the active tree and drive its
//! animations through an egui UI.

use eframe::App;
use glam::Vec2;
use rand::rng;
use tree_core::{
    config::Config,
    input,
    layout::{self, PositionedTree},
    playback::{PlaybackController, PlaybackState, TickOutcome},
    presets::Preset,
    schedule::Metronome,
    traversal::TraversalKind,
    types::NodeId,
};

/// Top-level sections of the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Static preset trees, no animation.
    Gallery,
    /// Traversal animation over the binary presets.
    Traversal,
    /// Step-by-step search tree construction from typed values.
    Builder,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Gallery, Tab::Traversal, Tab::Builder];

    fn title(self) -> &'static str {
        match self {
            Tab::Gallery => "Tree types",
            Tab::Traversal => "Traversals",
            Tab::Builder => "BST builder",
        }
    }
}

/// Main application state for the interactive viewer.
///
/// The per-frame update is:
/// 1. Handle UI interactions, forwarding requests to `ctrl`.
/// 2. Deliver the controller's pending tick once `metronome` says it is due.
/// 3. Lay out the current snapshot and draw it.
///
/// ### Fields
/// - `ctrl` - Tree snapshot plus build/traversal progress.
/// - `cfg` - Layout metrics and tick intervals.
/// - `metronome` - Paces ticks against egui's frame clock.
/// - `now` - egui time at the start of the current frame (seconds).
///
/// - `tab` - Active section.
/// - `gallery_preset` / `traversal_preset` - Selected fixtures per section.
/// - `input` - Text of the value list in the builder.
/// - `status` - Last request result shown in the status bar.
pub struct Viewer {
    ctrl: PlaybackController,
    cfg: Config,
    metronome: Metronome,
    now: f64,

    rng: rand::rngs::ThreadRng,

    tab: Tab,
    gallery_preset: Preset,
    traversal_preset: Preset,
    input: String,
    status: String,
}

impl Viewer {
    /// Creates a viewer showing the first gallery preset.
    pub fn new(cfg: Config) -> Self {
        let mut ctrl = PlaybackController::new(cfg.playback);
        let gallery_preset = Preset::default();
        ctrl.set_tree(Some(gallery_preset.tree()));

        Self {
            ctrl,
            cfg,
            metronome: Metronome::new(),
            now: 0.0,
            rng: rng(),
            tab: Tab::Gallery,
            gallery_preset,
            traversal_preset: Preset::BinaryExample,
            input: "50, 30, 70, 20, 40, 60, 80".to_owned(),
            status: String::new(),
        }
    }

    /// Switches section; playback progress never carries over.
    fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        log::debug!("switching to {:?}", tab);
        self.tab = tab;
        self.status.clear();
        self.metronome.stop();
        match tab {
            Tab::Gallery => self.ctrl.set_tree(Some(self.gallery_preset.tree())),
            Tab::Traversal => self.ctrl.set_tree(Some(self.traversal_preset.tree())),
            Tab::Builder => self.ctrl.reset(),
        }
    }

    fn select_preset(&mut self, preset: Preset) {
        self.metronome.stop();
        match self.tab {
            Tab::Gallery => self.gallery_preset = preset,
            Tab::Traversal => self.traversal_preset = preset,
            Tab::Builder => return,
        }
        self.ctrl.set_tree(Some(preset.tree()));
    }

    fn select_kind(&mut self, kind: TraversalKind) {
        if kind != self.ctrl.kind() {
            self.metronome.stop();
        }
        self.ctrl.set_kind(kind);
    }

    /// Forwards a build request for the typed values.
    fn request_build(&mut self) {
        match self.ctrl.start_build_str(&self.input) {
            Ok(count) => {
                self.status = format!("Inserting {count} values");
                self.metronome.restart(self.now);
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn request_traversal(&mut self) {
        let kind = self.ctrl.kind();
        match self.ctrl.start_traversal(kind) {
            Ok(()) => {
                self.status = format!("Running {kind} traversal");
                self.metronome.restart(self.now);
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn request_reset(&mut self) {
        self.metronome.stop();
        self.status.clear();
        match self.tab {
            Tab::Builder => self.ctrl.reset(),
            Tab::Gallery => self.ctrl.set_tree(Some(self.gallery_preset.tree())),
            Tab::Traversal => self.ctrl.set_tree(Some(self.traversal_preset.tree())),
        }
    }

    fn randomize_input(&mut self) {
        let values = input::random_values(7, 1..=99, &mut self.rng);
        self.input = input::format_values(&values);
    }

    /// Delivers the pending tick if it is due at `now`.
    ///
    /// ### Returns
    /// The tick's outcome, or `None` if nothing was due.
    fn pump(&mut self, now: f64) -> Option<TickOutcome> {
        self.now = now;
        let Some(tick) = self.ctrl.pending_tick() else {
            self.metronome.stop();
            return None;
        };
        if !self.metronome.is_running() {
            self.metronome.restart(now);
        }
        if !self.metronome.due(now, tick.delay) {
            return None;
        }

        let outcome = self.ctrl.fire(tick);
        match &outcome {
            TickOutcome::Duplicate { value } => {
                self.status = format!("{value} is already in the tree");
            }
            TickOutcome::Settled => self.status = "Tree complete".to_owned(),
            TickOutcome::Finished => {
                self.status = format!("{} traversal complete", self.ctrl.kind());
            }
            _ => {}
        }
        Some(outcome)
    }

    /// Converts a layout position to screen-space inside `rect`.
    fn to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
    }

    /// Labels of the visited nodes, in visiting order.
    fn visited_labels(&self, positioned: &PositionedTree) -> Vec<String> {
        self.ctrl
            .visited()
            .iter()
            .filter_map(|&id| positioned.get(id).map(|n| n.label.clone()))
            .collect()
    }

    fn node_color(&self, id: NodeId, is_new: bool) -> egui::Color32 {
        if is_new {
            egui::Color32::RED
        } else if self.ctrl.current() == Some(id) {
            egui::Color32::YELLOW
        } else if self.ctrl.is_visited(id) {
            egui::Color32::LIGHT_GREEN
        } else {
            egui::Color32::LIGHT_BLUE
        }
    }

    /// Builds the tab strip.
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    if ui.selectable_label(self.tab == tab, tab.title()).clicked() {
                        self.select_tab(tab);
                    }
                }
            });
        });
    }

    /// Builds the bottom status bar (state, node count, last message).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.metronome.last_dt));
                ui.separator();
                ui.label(format!(
                    "nodes = {}",
                    self.ctrl.tree().map_or(0, |t| t.len())
                ));
                ui.label(format!("state = {:?}", self.ctrl.state()));
                ui.separator();
                ui.label(self.status.as_str());
            });
        });
    }

    /// Builds the right-hand controls for the active tab.
    fn ui_controls_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("controls_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                match self.tab {
                    Tab::Gallery => self.ui_gallery_controls(ui),
                    Tab::Traversal => {
                        let binary = Preset::ALL.into_iter().filter(|p| p.is_traversable());
                        self.ui_preset_picker(ui, binary);
                        ui.separator();
                        self.ui_traversal_controls(ui);
                    }
                    Tab::Builder => {
                        self.ui_builder_controls(ui);
                        ui.separator();
                        self.ui_traversal_controls(ui);
                    }
                }
                self.ctrl.set_config(self.cfg.playback);
            });
    }

    fn ui_gallery_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tree types");
        self.ui_preset_picker(ui, Preset::ALL.into_iter());
        ui.separator();
        ui.label(self.gallery_preset.description());
    }

    fn ui_preset_picker(&mut self, ui: &mut egui::Ui, presets: impl Iterator<Item = Preset>) {
        let current = match self.tab {
            Tab::Traversal => self.traversal_preset,
            _ => self.gallery_preset,
        };
        let mut picked = current;
        ui.vertical(|ui| {
            for preset in presets {
                ui.selectable_value(&mut picked, preset, preset.name());
            }
        });
        if picked != current {
            self.select_preset(picked);
        }
    }

    fn ui_traversal_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Traversal");
        let mut kind = self.ctrl.kind();
        ui.horizontal(|ui| {
            for k in TraversalKind::ALL {
                ui.selectable_value(&mut kind, k, k.name());
            }
        });
        if kind != self.ctrl.kind() {
            self.select_kind(kind);
        }

        let building = self.ctrl.state() == PlaybackState::Building;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!building, egui::Button::new("▶ Traverse"))
                .clicked()
            {
                self.request_traversal();
            }
            if ui.button("Reset").clicked() {
                self.request_reset();
            }
        });

        ui.add(
            egui::Slider::new(&mut self.cfg.playback.traversal_interval, 0.1..=3.0)
                .text("step (s)"),
        );
    }

    fn ui_builder_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Build a BST");
        ui.label("Values (comma separated):");
        ui.text_edit_singleline(&mut self.input);

        let building = self.ctrl.state() == PlaybackState::Building;
        ui.horizontal(|ui| {
            if ui.add_enabled(!building, egui::Button::new("Build")).clicked() {
                self.request_build();
            }
            if ui.button("🎲 Random").clicked() {
                self.randomize_input();
            }
        });

        ui.add(
            egui::Slider::new(&mut self.cfg.playback.build_interval, 0.1..=3.0)
                .text("insert (s)"),
        );

        let queued: Vec<i64> = self.ctrl.snapshot().queue.iter().copied().collect();
        if !queued.is_empty() {
            ui.label(format!("Queued: {}", input::format_values(&queued)));
        }
    }

    /// Builds the central panel where the tree is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            let positioned = layout::layout(
                self.ctrl.tree().map(|t| &**t),
                rect.width(),
                rect.height() - 40.0,
                &self.cfg.layout,
            );

            // Draw edges.
            for (parent, child) in positioned.edges() {
                let a = Self::to_screen(parent.pos, rect);
                let b = Self::to_screen(child.pos, rect);
                painter.line_segment([a, b], egui::Stroke::new(1.5, egui::Color32::GRAY));
            }

            // Draw nodes with their labels.
            let r = self.cfg.layout.node_radius;
            for node in &positioned.nodes {
                let p = Self::to_screen(node.pos, rect);
                painter.circle_filled(p, r, self.node_color(node.id, node.is_new));
                painter.circle_stroke(p, r, egui::Stroke::new(1.0, egui::Color32::DARK_GRAY));
                painter.text(
                    p,
                    egui::Align2::CENTER_CENTER,
                    &node.label,
                    egui::FontId::proportional(14.0),
                    egui::Color32::BLACK,
                );
            }

            if positioned.is_empty() && self.tab == Tab::Builder {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Enter values and press Build",
                    egui::FontId::proportional(16.0),
                    egui::Color32::GRAY,
                );
            }

            let visited = self.visited_labels(&positioned);
            if !visited.is_empty() {
                painter.text(
                    egui::pos2(rect.min.x + 8.0, rect.max.y - 20.0),
                    egui::Align2::LEFT_CENTER,
                    format!("{}: {}", self.ctrl.kind(), visited.join(" → ")),
                    egui::FontId::monospace(14.0),
                    egui::Color32::LIGHT_GREEN,
                );
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// This method:
    /// - Renders the tab strip, status bar and controls.
    /// - Delivers a due playback tick.
    /// - Draws the tree for the current snapshot.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.now = ctx.input(|i| i.time);

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_controls_panel(ctx);

        self.pump(self.now);
        self.ui_central_panel(ctx);

        if self.ctrl.pending_tick().is_some() {
            ctx.request_repaint();
        }
    }
}
