use crossterm::event::{self, Event as CEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(poll_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || loop {
            if event::poll(poll_rate).unwrap_or(false) {
                let app_event = match event::read() {
                    Ok(CEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                        Some(AppEvent::Key(key))
                    }
                    Ok(CEvent::Resize(_, _)) => Some(AppEvent::Resize),
                    _ => None,
                };
                if let Some(ev) = app_event {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
            }
        });
        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
