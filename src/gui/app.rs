use anyhow::Result;
use eframe::egui;

use crate::config::AppConfig;
use crate::core::{
    controller::CardReaderController,
    reader::{PcscReader, ReaderConnector, ReaderDirectory, ReaderName},
    transcript::Transcript,
};

/// Modal error shown over the main window until acknowledged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

impl ErrorDialog {
    fn new(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

pub struct SmartCardReaderApp {
    config: AppConfig,
    controller: CardReaderController,

    // Reader state
    available_readers: Vec<ReaderName>,
    selected_reader_idx: Option<usize>,

    // Output area
    transcript: Transcript,

    // Status messages
    status_message: String,
    error_dialog: Option<ErrorDialog>,
}

impl SmartCardReaderApp {
    /// Query the directory once and build the window state around `connector`
    pub fn new(
        config: AppConfig,
        directory: &dyn ReaderDirectory,
        connector: Box<dyn ReaderConnector>,
    ) -> Self {
        let mut app = Self {
            config,
            controller: CardReaderController::new(connector),
            available_readers: Vec::new(),
            selected_reader_idx: None,
            transcript: Transcript::new(),
            status_message: String::new(),
            error_dialog: None,
        };

        match directory.list_readers() {
            Ok(readers) => {
                app.status_message = if readers.is_empty() {
                    "No readers found".to_string()
                } else {
                    format!("Found {} reader(s)", readers.len())
                };
                app.available_readers = readers;
            }
            Err(e) => {
                log::error!("Failed to list readers: {e:#}");
                app.status_message = "No readers found".to_string();
                app.error_dialog = Some(ErrorDialog::new(format!("Failed to list readers: {e:#}")));
            }
        }

        app
    }

    pub fn readers(&self) -> &[ReaderName] {
        &self.available_readers
    }

    pub fn output(&self) -> &str {
        self.transcript.text()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn error_dialog(&self) -> Option<&ErrorDialog> {
        self.error_dialog.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error_dialog = None;
    }

    /// Handle a pick in the reader dropdown. Out-of-range indices are ignored.
    pub fn on_reader_chosen(&mut self, idx: usize) {
        let Some(name) = self.available_readers.get(idx) else {
            return;
        };

        self.controller.select_reader(name.clone());
        self.selected_reader_idx = Some(idx);
        self.status_message = format!("Selected {name}");
    }

    /// Handle a click on the read button
    pub fn on_read_requested(&mut self) {
        match self.controller.read_card() {
            Ok(read) => {
                self.status_message = format!("Read card on {}", read.reader);
                self.transcript.append(read);
            }
            Err(e) => {
                self.error_dialog = Some(ErrorDialog::new(e.to_string()));
            }
        }
    }

    fn export_reads(&mut self) {
        match self.transcript.export_json() {
            Ok(json) => {
                log::info!("Exported {} read(s):\n{}", self.transcript.len(), json);
                self.status_message = "Reads exported to log".to_string();
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.error_dialog = Some(ErrorDialog::new(format!("Export failed: {e:#}")));
            }
        }
    }

    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.error_dialog else {
            return;
        };

        let mut acknowledged = false;
        egui::Window::new(dialog.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(dialog.message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });

        if acknowledged {
            self.dismiss_error();
        }
    }
}

impl eframe::App for SmartCardReaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dialog_open = self.error_dialog.is_some();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_enabled_ui(!dialog_open, |ui| {
                egui::menu::bar(ui, |ui| {
                    ui.menu_button("File", |ui| {
                        if ui
                            .add_enabled(!self.transcript.is_empty(), egui::Button::new("Export reads"))
                            .clicked()
                        {
                            self.export_reads();
                            ui.close_menu();
                        }
                        ui.separator();
                        if ui.button("Exit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Status:");
                ui.colored_label(egui::Color32::from_rgb(0, 150, 0), &self.status_message);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!dialog_open, |ui| {
                ui.vertical_centered(|ui| {
                    let selected_text = self
                        .selected_reader_idx
                        .and_then(|i| self.available_readers.get(i))
                        .map_or(self.config.reader_placeholder.clone(), ToString::to_string);

                    let mut chosen = None;
                    egui::ComboBox::from_id_salt("reader_selector")
                        .selected_text(selected_text)
                        .width(400.0)
                        .show_ui(ui, |ui| {
                            for (i, name) in self.available_readers.iter().enumerate() {
                                let selected = self.selected_reader_idx == Some(i);
                                if ui.selectable_label(selected, name.as_str()).clicked() {
                                    chosen = Some(i);
                                }
                            }
                        });
                    if let Some(i) = chosen {
                        self.on_reader_chosen(i);
                    }
                });

                ui.separator();

                let output_height = (ui.available_height() - 40.0).max(100.0);
                egui::ScrollArea::vertical()
                    .max_height(output_height)
                    .stick_to_bottom(true)
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut self.transcript.text())
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY)
                                .desired_rows(30),
                        );
                    });

                ui.separator();

                ui.vertical_centered(|ui| {
                    if ui.button(self.config.read_button_label.as_str()).clicked() {
                        self.on_read_requested();
                    }
                });
            });
        });

        self.show_error_dialog(ctx);
    }
}

pub fn run_gui(config: AppConfig) -> Result<()> {
    let backend = PcscReader::new(config.share_mode)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.as_str())
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let app = SmartCardReaderApp::new(config, &backend, Box::new(backend.clone()));

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
