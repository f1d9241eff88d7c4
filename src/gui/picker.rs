//! The picker view: a thin coordinator between the rendered grid and the
//! daemon. All state lives in [`Picker`]; every mutation is a reaction to a
//! [`Message`] on the single UI thread.

use iced::futures::StreamExt;
use iced::{
    Background, Border, Color, Element, Length, Pixels, Size, Subscription, Task, Theme,
    widget::{
        button, column, container, image, mouse_area, pick_list, scrollable, text, text_input,
    },
};
use std::path::PathBuf;

use crate::catalog::{self, WallpaperEntry};
use crate::config::PickerConfig;
use crate::gui::connection::{self, CommandSender, Event};
use crate::ipc::Request;

macro_rules! themes {
    ($($variant:ident),*) => {
        fn string_to_theme(theme_str: &str) -> Theme {
            match theme_str {
                $(stringify!($variant) => Theme::$variant,)*
                _ => Theme::Dark,
            }
        }
    };
}

themes!(
    Dark,
    Light,
    Dracula,
    Nord,
    SolarizedLight,
    SolarizedDark,
    GruvboxLight,
    GruvboxDark,
    CatppuccinLatte,
    CatppuccinFrappe,
    CatppuccinMacchiato,
    CatppuccinMocha,
    TokyoNight,
    TokyoNightStorm,
    TokyoNightLight,
    KanagawaWave,
    KanagawaDragon,
    KanagawaLotus,
    Moonfly,
    Nightfly,
    Oxocarbon
);

#[derive(Debug, Clone)]
pub enum Message {
    Daemon(connection::Event),
    ScreenSelected(String),
    SearchChanged(String),
    TileActivated(u64),
    StopPressed,
}

/// One rendered grid entry. The id is captured at build time and travels
/// with the activation message; replacing the tile vector discards every
/// superseded id wholesale.
struct Tile {
    id: u64,
    title: String,
    preview: Option<image::Handle>,
}

impl Tile {
    fn from_entry(entry: WallpaperEntry) -> Self {
        let preview = match catalog::decode_preview(&entry.preview_b64) {
            Ok(bytes) => Some(image::Handle::from_bytes(bytes)),
            Err(err) => {
                tracing::warn!(id = entry.id, "failed to decode preview: {err}");
                None
            }
        };

        Self {
            id: entry.id,
            title: entry.title,
            preview,
        }
    }
}

pub struct Picker {
    socket: PathBuf,
    config: PickerConfig,
    commands: Option<CommandSender>,
    tiles: Vec<Tile>,
    screens: Vec<String>,
    selected_screen: Option<String>,
    search: String,
    announced: bool,
    status: Option<String>,
}

impl Picker {
    pub fn new(socket: PathBuf, config: PickerConfig) -> (Self, Task<Message>) {
        let app = Self {
            socket,
            config,
            commands: None,
            tiles: Vec::new(),
            screens: Vec::new(),
            selected_screen: None,
            search: String::new(),
            announced: false,
            status: None,
        };

        (app, Task::none())
    }

    fn do_update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Daemon(event) => self.on_daemon_event(event),
            Message::ScreenSelected(screen) => {
                self.selected_screen = Some(screen);
            }
            Message::SearchChanged(search) => {
                self.search = search.clone();
                self.dispatch(Request::ApplyFilter { search });
            }
            Message::TileActivated(id) => {
                let screen = self.selected_screen.clone().unwrap_or_default();
                self.dispatch(Request::SetWallpaper { id, screen });
            }
            Message::StopPressed => {
                self.dispatch(Request::StopDaemon);
            }
        }

        Task::none()
    }

    fn on_daemon_event(&mut self, event: Event) {
        match event {
            Event::Connected(sender) => {
                self.commands = Some(sender);
                self.status = None;
                self.dispatch(Request::GetScreens);
            }
            Event::Screens(screens) => {
                self.selected_screen = match &self.selected_screen {
                    Some(current) if screens.contains(current) => Some(current.clone()),
                    _ => screens.first().cloned(),
                };
                self.screens = screens;

                // Readiness is signaled once, after the selector holds the
                // live display set, so no initial push can be missed.
                if !self.announced {
                    self.announced = true;
                    self.dispatch(Request::Loaded);
                }
            }
            Event::Catalog(entries) => {
                self.tiles = entries.into_iter().map(Tile::from_entry).collect();
            }
            Event::DaemonError(err) => {
                tracing::warn!("daemon rejected a request: {err}");
                self.status = Some(err.to_string());
            }
            Event::Disconnected(reason) => {
                tracing::error!("daemon connection lost: {reason}");
                self.commands = None;
                self.status = Some(format!("Daemon unavailable: {reason}"));
            }
        }
    }

    fn dispatch(&mut self, request: Request) {
        let command = request.name();
        match self.commands.as_mut() {
            Some(sender) => match sender.try_send(request) {
                Ok(()) => tracing::debug!(command, "queued picker command"),
                Err(err) => {
                    tracing::error!(command, "failed to queue picker command: {err}");
                    self.status = Some("Daemon command queue unavailable".to_string());
                }
            },
            None => {
                tracing::warn!(command, "dropping command, not connected to daemon");
                self.status = Some("Not connected to the daemon".to_string());
            }
        }
    }

    fn controls(&self) -> Element<'_, Message> {
        let selector = pick_list(
            self.screens.clone(),
            self.selected_screen.clone(),
            Message::ScreenSelected,
        );

        let search = text_input("Search wallpapers", &self.search)
            .on_input(Message::SearchChanged)
            .width(Length::Fill);

        let stop = button(text("Stop daemon")).on_press(Message::StopPressed);

        iced::widget::row([selector.into(), search.into(), stop.into()])
            .spacing(10)
            .into()
    }

    fn tile_grid(&self, actual_width: usize) -> Element<'_, Message> {
        if self.tiles.is_empty() {
            return container(text("No wallpapers to show"))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        }

        let tile_width = 220;
        let tile_height = 170;
        let spacing = 10;
        let padding = 10;

        let tiles_per_row = (actual_width.saturating_sub(padding) / (tile_width + spacing)).max(1);

        let mut rows = Vec::new();

        for chunk in self.tiles.chunks(tiles_per_row) {
            let mut row_elements = Vec::new();

            for tile in chunk {
                let preview: Element<'_, Message> = if let Some(handle) = &tile.preview {
                    image(handle.clone())
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .content_fit(iced::ContentFit::Cover)
                        .into()
                } else {
                    container(text("No preview"))
                        .center_x(Length::Fill)
                        .center_y(Length::Fill)
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .into()
                };

                let card = container(
                    column([
                        container(preview)
                            .width(Length::Fill)
                            .height((tile_height - 40) as u16)
                            .into(),
                        text(&tile.title).size(14).into(),
                    ])
                    .spacing(4),
                )
                .width(tile_width as u16)
                .height(tile_height as u16)
                .padding(3)
                .style(|_theme| container::Style {
                    border: Border {
                        width: 1.0,
                        color: Color::from_rgb(0.5, 0.5, 0.5),
                        radius: 5.0.into(),
                    },
                    background: Some(Background::Color(Color::from_rgba(0.3, 0.3, 0.3, 0.5))),
                    ..Default::default()
                });

                row_elements.push(mouse_area(card).on_press(Message::TileActivated(tile.id)).into());
            }

            let row = iced::widget::row(row_elements).spacing(Pixels(spacing as f32));
            rows.push(row.into());
        }

        let grid = iced::widget::column(rows)
            .spacing(Pixels(spacing as f32))
            .padding(20)
            .width(Length::Shrink);

        let scrollable_content = scrollable(grid).width(Length::Shrink).height(Length::Fill);

        container(scrollable_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    fn theme(&self) -> Theme {
        string_to_theme(&self.config.theme)
    }
}

pub fn run(socket: PathBuf, config: PickerConfig) -> iced::Result {
    iced::application("Paperdeck", update, view)
        .theme(|app: &Picker| app.theme())
        .subscription(subscription)
        .window_size(Size {
            width: 870.0,
            height: 800.0,
        })
        .run_with(move || Picker::new(socket, config))
}

fn subscription(app: &Picker) -> Subscription<Message> {
    Subscription::run_with_id(
        "daemon-io",
        connection::connect(app.socket.clone()).map(Message::Daemon),
    )
}

fn update(app: &mut Picker, message: Message) -> Task<Message> {
    app.do_update(message)
}

fn view(app: &Picker) -> Element<'_, Message> {
    let grid = iced::widget::responsive(move |size| app.tile_grid(size.width as usize));

    let mut content = vec![
        container(app.controls()).padding(10).into(),
        grid.into(),
    ];

    if let Some(status) = &app.status {
        content.push(
            container(text(status).size(13))
                .width(Length::Fill)
                .padding(6)
                .into(),
        );
    }

    iced::widget::column(content).into()
}
