//! # Display Management
//!
//! Plain-text screen composition: the map window, the status panel and a
//! bounded message log.

use crate::config;
use crate::game::{GameEvent, GamePlay, MessageImportance};
use crate::rendering::status_panel;
use crate::utils::Roller;
use std::collections::VecDeque;

/// Text display for a terminal driver.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    /// Message history, oldest first
    messages: VecDeque<String>,
    /// Maximum number of messages to keep
    max_messages: usize,
    /// Events below this importance are not shown
    min_importance: MessageImportance,
    /// Number of recent messages drawn under the map
    visible_messages: usize,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay {
    /// Creates a display keeping [`config::MAX_MESSAGES`] lines.
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            max_messages: config::MAX_MESSAGES,
            min_importance: MessageImportance::Debug,
            visible_messages: 8,
        }
    }

    /// Hides events less important than `importance`.
    pub fn with_min_importance(mut self, importance: MessageImportance) -> Self {
        self.min_importance = importance;
        self
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push_back(message.into());
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }
    }

    /// Appends the narration of `events`, filtered by importance.
    pub fn add_events(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            if event.importance() >= self.min_importance {
                self.add_message(event.to_string());
            }
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Full screen: map window, status panel, then the latest messages.
    pub fn render<R: Roller>(&self, game: &GamePlay<R>) -> String {
        let mut screen = game.view();
        screen.push('\n');
        screen.push_str(&status_panel(game));
        screen.push_str("\n\n");

        let skip = self.messages.len().saturating_sub(self.visible_messages);
        for message in self.messages.iter().skip(skip) {
            screen.push_str(message);
            screen.push('\n');
        }
        screen
    }
}
