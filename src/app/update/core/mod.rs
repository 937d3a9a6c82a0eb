mod reducer;
mod runtime;
mod shortcuts;

use iced::{Subscription, Task, event, time};

use super::super::messages::Message;
use super::super::state::{App, TAP_TICK_INTERVAL};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions = vec![event::listen_with(runtime::runtime_event_to_message)];

        // The tick timer only runs while a single tap waits on the
        // double-tap window.
        if app
            .reader
            .as_ref()
            .is_some_and(|reader| reader.pending_tap.is_some())
        {
            subscriptions.push(time::every(TAP_TICK_INTERVAL).map(Message::Tick));
        }

        Subscription::batch(subscriptions)
    }
}
