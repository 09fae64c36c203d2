use std::env;

use anyhow::Result;
use eframe::emath::Align2;
use eframe::{egui, Frame};
use egui::{Context, WidgetText};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use kith_common::Username;
use kith_core::{Directory, SnapshotStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("user_data.json"));
    let directory = Directory::open(SnapshotStore::new(path))?;
    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(420.0, 320.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Kith",
        options,
        Box::new(|_cc| Box::new(KithApp::new(directory))),
    )
    .unwrap();
    Ok(())
}

struct KithApp {
    directory: Directory,
    username_entry: String,
    content_entry: String,
    friend_entry: String,
    current_user: Option<Username>,
    show_friends: bool,
    show_posts: bool,
    toasts: Toasts,
}

impl KithApp {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            username_entry: String::new(),
            content_entry: String::new(),
            friend_entry: String::new(),
            current_user: None,
            show_friends: false,
            show_posts: false,
            toasts: Toasts::new()
                .anchor(Align2::LEFT_TOP, (10.0, 10.0))
                .direction(egui::Direction::TopDown),
        }
    }

    fn friends_window(&mut self, ctx: &Context) {
        let Some(user) = self.current_user.clone() else { return };
        let directory = &self.directory;
        let mut open = self.show_friends;
        egui::Window::new("Friends Information")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                let friends = directory.friends(&user).unwrap_or_default();
                let listing = friends
                    .iter()
                    .map(Username::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                ui.label(format!("Friends of {user}: {listing}"));
            });
        self.show_friends = open;
    }

    fn posts_window(&mut self, ctx: &Context) {
        let Some(user) = self.current_user.clone() else { return };
        let directory = &self.directory;
        let mut open = self.show_posts;
        egui::Window::new("Posts Information")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                let posts = directory.posts(&user).unwrap_or_default();
                let listing = posts.join(", ");
                ui.label(format!("Posts by {user}: {listing}"));
            });
        self.show_posts = open;
    }
}

impl eframe::App for KithApp {
    fn update(&mut self, ctx: &Context, frame: &mut Frame) {
        let mut notify = |kind: ToastKind, text: String| {
            self.toasts.add(Toast {
                kind,
                text: WidgetText::from(text),
                options: ToastOptions::default()
                    .duration_in_seconds(3.0)
                    .show_progress(true)
                    .show_icon(true),
            });
        };
        let current = self.current_user.clone();
        egui::CentralPanel::default().show(ctx, |ui| match current {
            None => {
                ui.heading("Kith");
                ui.label("Enter Username:");
                ui.text_edit_singleline(&mut self.username_entry);
                ui.horizontal(|ui| {
                    if ui.button("Login").clicked() {
                        let username = Username::new(&self.username_entry);
                        if self.directory.authenticate(&username) {
                            notify(ToastKind::Success, format!("User {username} logged in."));
                            self.current_user = Some(username);
                        } else {
                            notify(ToastKind::Error, String::from("User does not exist."));
                        }
                    }
                    if ui.button("Sign Up").clicked() {
                        let username = Username::new(&self.username_entry);
                        match self.directory.create_account(&username) {
                            Ok(()) => {
                                notify(ToastKind::Success, format!("User {username} created."));
                                self.current_user = Some(username);
                            }
                            Err(error) => notify(ToastKind::Error, error.to_string()),
                        }
                    }
                    if ui.button("Exit").clicked() {
                        frame.close();
                    }
                });
            }
            Some(user) => {
                ui.heading(format!("Logged in as: {user}"));
                ui.label("Post content:");
                ui.text_edit_singleline(&mut self.content_entry);
                if ui.button("Make Post").clicked() {
                    match self.directory.add_post(&user, self.content_entry.as_str()) {
                        Ok(()) => notify(ToastKind::Success, format!("Post created by {user}.")),
                        Err(error) => notify(ToastKind::Error, error.to_string()),
                    }
                }
                ui.label("Friend username:");
                ui.text_edit_singleline(&mut self.friend_entry);
                if ui.button("Add Friendship").clicked() {
                    let friend = Username::new(&self.friend_entry);
                    match self.directory.add_friendship(&user, &friend) {
                        Ok(()) => notify(
                            ToastKind::Success,
                            format!("{user} and {friend} are now friends."),
                        ),
                        Err(error) => notify(ToastKind::Error, error.to_string()),
                    }
                }
                ui.horizontal(|ui| {
                    if ui.button("Display Friends Info").clicked() {
                        self.show_friends = true;
                    }
                    if ui.button("Display Posts Info").clicked() {
                        self.show_posts = true;
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Log Out").clicked() {
                        self.current_user = None;
                    }
                    if ui.button("Exit").clicked() {
                        frame.close();
                    }
                });
            }
        });
        self.friends_window(ctx);
        self.posts_window(ctx);
        self.toasts.show(ctx);
    }
}
