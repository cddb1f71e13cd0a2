#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui desktop entry point for Dotmini ENGLab.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use englab::{
    calc::{self, CalcError},
    chat, config,
    plot::{self, PlotError},
    topic::Topic,
};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("failed to load config.toml ({e}); using defaults");
            config::Config::default()
        }
    };
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1000.0, 700.0])
        .with_min_inner_size([720.0, 480.0]);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Dotmini ENGLab",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ModalKind {
    Info,
    Warning,
    Critical,
}

/// A pending modal dialog; dismissed with its OK button.
struct ErrorModal {
    title: String,
    body: String,
    kind: ModalKind,
}

impl ErrorModal {
    fn info(title: &str, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into(), kind: ModalKind::Info }
    }

    fn warning(title: &str, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into(), kind: ModalKind::Warning }
    }

    fn critical(title: &str, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into(), kind: ModalKind::Critical }
    }
}

/// One completed chat exchange in the transcript.
struct ChatExchange {
    user: String,
    reply: String,
    is_error: bool,
}

struct GuiApp {
    config: config::Config,
    chat_client: chat::ChatClient,
    // Topic form
    topic: Option<Topic>,
    field_values: Vec<String>,
    result: Option<String>,
    // Plot window
    plot_curve: Option<plot::PlotCurve>,
    show_plot_window: bool,
    // Modal dialogs
    error_modal: Option<ErrorModal>,
    // Chat
    chat_input: String,
    transcript: Vec<ChatExchange>,
    chat_in_flight: Option<String>,
    chat_rx: Option<Receiver<Result<String, String>>>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let chat_client = chat::ChatClient::new(&config.api);
        if !chat_client.has_api_key() {
            log::warn!("no API key configured; chat is disabled until one is set");
        }
        Self {
            config,
            chat_client,
            topic: None,
            field_values: Vec::new(),
            result: None,
            plot_curve: None,
            show_plot_window: false,
            error_modal: None,
            chat_input: String::new(),
            transcript: Vec::new(),
            chat_in_flight: None,
            chat_rx: None,
        }
    }

    /// Replaces the form with the new topic's field set. The previous
    /// widgets' backing state is fully discarded.
    fn select_topic(&mut self, topic: Option<Topic>) {
        self.topic = topic;
        self.field_values = match topic {
            Some(t) => vec![String::new(); t.fields().len()],
            None => Vec::new(),
        };
    }

    fn run_calculate(&mut self) {
        let Some(topic) = self.topic else {
            self.result = Some("Please select a valid topic.".into());
            return;
        };
        match calc::compute(topic, &self.field_values) {
            Ok(text) => self.result = Some(text),
            Err(CalcError::Input(msg)) => {
                self.error_modal = Some(ErrorModal::warning("Input Error", msg));
            }
            Err(err) => {
                self.error_modal =
                    Some(ErrorModal::critical("Calculation Error", err.to_string()));
            }
        }
    }

    fn run_plot(&mut self) {
        let Some(topic) = self.topic else {
            self.result = Some("Please select a valid topic.".into());
            return;
        };
        match plot::curve(topic, &self.field_values) {
            Ok(curve) => {
                self.plot_curve = Some(curve);
                self.show_plot_window = true;
            }
            Err(PlotError::Unsupported(t)) => {
                self.error_modal = Some(ErrorModal::info(
                    "Plotting",
                    format!("Plotting is not available for {t}."),
                ));
            }
            Err(PlotError::Calc(CalcError::Input(msg))) => {
                self.error_modal = Some(ErrorModal::warning("Input Error", msg));
            }
            Err(PlotError::Calc(err)) => {
                self.error_modal =
                    Some(ErrorModal::critical("Calculation Error", err.to_string()));
            }
        }
    }

    /// Dispatches the chat input to a worker thread. At most one request is
    /// in flight; the Send button stays disabled until it settles.
    fn send_chat(&mut self) {
        if self.chat_rx.is_some() {
            return;
        }
        let message = self.chat_input.trim().to_string();
        if message.is_empty() {
            self.error_modal =
                Some(ErrorModal::warning("Input Error", "Please enter a message."));
            return;
        }
        let client = self.chat_client.clone();
        let latex_hint = self.config.ui.latex_hint;
        let (tx, rx) = mpsc::channel();
        let outgoing = message.clone();
        thread::spawn(move || {
            let result = client.send(&outgoing, latex_hint).map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
        self.chat_rx = Some(rx);
        self.chat_in_flight = Some(message);
        self.chat_input.clear();
    }

    fn poll_chat(&mut self) {
        let Some(rx) = &self.chat_rx else { return };
        let settled = match rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err("chat worker stopped unexpectedly".into()))
            }
        };
        if let Some(result) = settled {
            let user = self.chat_in_flight.take().unwrap_or_default();
            match result {
                Ok(reply) => {
                    self.transcript.push(ChatExchange { user, reply, is_error: false });
                }
                Err(err) => {
                    log::error!("chat send failed: {err}");
                    self.transcript.push(ChatExchange {
                        user,
                        reply: format!("Error: {err}"),
                        is_error: true,
                    });
                }
            }
            self.chat_rx = None;
        }
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Physics Lab");
        ui.add_space(8.0);
        let before = self.topic;
        egui::ComboBox::from_id_source("topic_select")
            .selected_text(
                self.topic
                    .map(|t| t.display_name())
                    .unwrap_or("Select Topic"),
            )
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.topic, None, "Select Topic");
                for t in Topic::ALL {
                    ui.selectable_value(&mut self.topic, Some(t), t.display_name());
                }
            });
        if before != self.topic {
            self.select_topic(self.topic);
        }
        ui.add_space(8.0);

        if let Some(topic) = self.topic {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                egui::Grid::new("input_form")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        for (i, field) in topic.fields().iter().enumerate() {
                            ui.label(field.label);
                            ui.add(
                                egui::TextEdit::singleline(&mut self.field_values[i])
                                    .desired_width(200.0),
                            );
                            ui.end_row();
                        }
                    });
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Calculate").clicked() {
                    self.run_calculate();
                }
                let plot_button = ui
                    .add_enabled(topic.plot_supported(), egui::Button::new("Plot Graph"))
                    .on_disabled_hover_text(format!("Plotting is not available for {topic}."));
                if plot_button.clicked() {
                    self.run_plot();
                }
            });
            ui.add_space(8.0);
        }

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_height(40.0);
            match &self.result {
                Some(text) => ui.label(text),
                None => ui.weak("Results will appear here"),
            };
        });
    }

    fn ui_chat(&mut self, ui: &mut egui::Ui) {
        ui.heading("AI Chat");
        ui.add_space(4.0);
        let pending = self.chat_rx.is_some();
        let footer_height = 80.0;
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .max_height((ui.available_height() - footer_height).max(60.0))
            .show(ui, |ui| {
                for exchange in &self.transcript {
                    ui.label(
                        egui::RichText::new(format!("You: {}", exchange.user)).strong(),
                    );
                    if exchange.is_error {
                        ui.colored_label(
                            ui.visuals().error_fg_color,
                            format!("AI: {}", exchange.reply),
                        );
                    } else {
                        ui.label(format!("AI: {}", exchange.reply));
                    }
                    ui.add_space(8.0);
                }
                if let Some(outgoing) = &self.chat_in_flight {
                    ui.label(egui::RichText::new(format!("You: {outgoing}")).strong());
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.weak("Waiting for reply...");
                    });
                }
            });
        ui.separator();
        if ui
            .checkbox(&mut self.config.ui.latex_hint, "Ask for LaTeX math notation")
            .changed()
        {
            if let Err(e) = self.config.save() {
                log::warn!("failed to save config.toml: {e}");
            }
        }
        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.chat_input)
                    .hint_text("Ask a question...")
                    .desired_width(ui.available_width() - 64.0),
            );
            let send_clicked = ui.add_enabled(!pending, egui::Button::new("Send")).clicked();
            let enter_pressed = input.lost_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if !pending && (send_clicked || enter_pressed) {
                self.send_chat();
            }
        });
    }

    fn ui_modal(&mut self, ctx: &egui::Context) {
        let mut close = false;
        if let Some(modal) = &self.error_modal {
            let color = match modal.kind {
                ModalKind::Info => ctx.style().visuals.text_color(),
                ModalKind::Warning => ctx.style().visuals.warn_fg_color,
                ModalKind::Critical => ctx.style().visuals.error_fg_color,
            };
            egui::Window::new(modal.title.clone())
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(color, &modal.body);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            close = true;
                        }
                    });
                });
        }
        if close {
            self.error_modal = None;
        }
    }

    fn ui_plot_window(&mut self, ctx: &egui::Context) {
        if !self.show_plot_window {
            return;
        }
        let mut open = true;
        if let Some(curve) = &self.plot_curve {
            egui::Window::new(curve.title.clone())
                .open(&mut open)
                .default_size([520.0, 380.0])
                .show(ctx, |ui| {
                    Plot::new("topic_plot")
                        .legend(Legend::default())
                        .x_axis_label(curve.x_label.clone())
                        .y_axis_label(curve.y_label.clone())
                        .show(ui, |plot_ui| {
                            for series in &curve.series {
                                plot_ui.line(
                                    Line::new(PlotPoints::from(series.points.clone()))
                                        .name(&series.name),
                                );
                            }
                        });
                });
        }
        if !open {
            self.show_plot_window = false;
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_chat();
        if self.chat_rx.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Dotmini ENGLab");
                if !self.chat_client.has_api_key() {
                    ui.separator();
                    ui.colored_label(
                        ui.visuals().warn_fg_color,
                        "No API key configured. Set ENGLAB_API_KEY or edit config.toml to enable chat.",
                    );
                }
            });
        });

        egui::SidePanel::right("chat_panel")
            .resizable(true)
            .min_width(260.0)
            .default_width(360.0)
            .show(ctx, |ui| {
                self.ui_chat(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_form(ui);
                });
        });

        self.ui_plot_window(ctx);
        self.ui_modal(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> GuiApp {
        GuiApp::new(config::Config::default())
    }

    #[test]
    fn topic_change_rebuilds_the_form() {
        let mut app = app();
        app.select_topic(Some(Topic::Kinematics));
        assert_eq!(app.field_values.len(), 3);
        app.field_values[0] = "5".into();
        app.select_topic(Some(Topic::Dynamics));
        assert_eq!(app.field_values.len(), 2);
        assert!(app.field_values.iter().all(String::is_empty));
        app.select_topic(None);
        assert!(app.field_values.is_empty());
    }

    #[test]
    fn calculate_writes_the_result_and_is_idempotent() {
        let mut app = app();
        app.select_topic(Some(Topic::NewtonsLaws));
        app.field_values = vec!["5".into(), "2".into()];
        app.run_calculate();
        assert_eq!(app.result.as_deref(), Some("Force: 10.00 N"));
        app.run_calculate();
        assert_eq!(app.result.as_deref(), Some("Force: 10.00 N"));
    }

    #[test]
    fn invalid_input_raises_a_modal_and_keeps_the_result() {
        let mut app = app();
        app.select_topic(Some(Topic::Dynamics));
        app.field_values = vec!["2".into(), "3".into()];
        app.run_calculate();
        let before = app.result.clone();
        app.field_values[0] = "abc".into();
        app.run_calculate();
        assert!(app.error_modal.is_some());
        assert_eq!(app.result, before);
    }

    #[test]
    fn zero_time_raises_a_calculation_error_modal() {
        let mut app = app();
        app.select_topic(Some(Topic::Kinematics));
        app.field_values = vec!["0".into(), "10".into(), "0".into()];
        app.run_calculate();
        let modal = app.error_modal.expect("modal");
        assert_eq!(modal.title, "Calculation Error");
        assert!(matches!(modal.kind, ModalKind::Critical));
    }

    #[test]
    fn empty_chat_message_never_spawns_a_request() {
        let mut app = app();
        app.chat_input = "   ".into();
        app.send_chat();
        assert!(app.chat_rx.is_none());
        assert!(app.chat_in_flight.is_none());
        let modal = app.error_modal.expect("modal");
        assert_eq!(modal.title, "Input Error");
    }

    #[test]
    fn unsupported_plot_topic_reports_capability_absent() {
        let mut app = app();
        app.select_topic(Some(Topic::ProjectileMotion));
        app.field_values = vec!["0".into(), "10".into(), "5".into()];
        app.run_plot();
        assert!(app.plot_curve.is_none());
        assert!(!app.show_plot_window);
        let modal = app.error_modal.expect("modal");
        assert_eq!(modal.title, "Plotting");
        assert!(matches!(modal.kind, ModalKind::Info));
    }
}
