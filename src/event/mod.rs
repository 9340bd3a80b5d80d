/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 *
 * This file is part of Kelpie Flight Route.
 *
 * Kelpie Flight Route is free software; you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation; either version 2 of the License, or
 * (at your option) any later version.
 *
 * Kelpie Flight Route is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Kelpie Flight Route; if not, write to the Free Software
 * Foundation, Inc., 59 Temple Place, Suite 330, Boston, MA  02111-1307  USA
 *
 * Contributors:
 *      Trevor Campbell
 *
 */

#![forbid(unsafe_code)]

//! Change notification for routes and their parameter providers.
//!
//! Listeners register for one or more event types and get a channel receiver.
//! Events are delivered with `try_send`, so notifying never blocks; receivers
//! are drained with `try_recv` on the same thread.

use std::collections::HashMap;
use std::sync::RwLock;

use async_channel::{Receiver, Sender, TrySendError};
use log::warn;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EventType {
    WaypointsChanged,
    SummaryChanged,
    AircraftChanged,
    WindChanged,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Event {
    /// The waypoint sequence of a route changed. Legs have been rebuilt and
    /// the route saved by the time this is sent.
    WaypointsChanged,
    /// Values derived from the route (summary, leg descriptions) may have changed.
    SummaryChanged,
    AircraftChanged,
    WindChanged,
}

impl Event {
    fn event_type(&self) -> EventType {
        match self {
            Event::WaypointsChanged => EventType::WaypointsChanged,
            Event::SummaryChanged => EventType::SummaryChanged,
            Event::AircraftChanged => EventType::AircraftChanged,
            Event::WindChanged => EventType::WindChanged,
        }
    }
}

#[derive(Default)]
pub struct EventManager {
    listeners: RwLock<HashMap<EventType, Vec<Sender<Event>>>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    // Registers a listener for multiple `event_types`.
    // Returns a receiver that will receive copies of those events when notified.
    pub fn register_listener(&self, event_types: &[EventType]) -> Option<Receiver<Event>> {
        let (tx, rx) = async_channel::unbounded::<Event>();

        let mut listeners = self.listeners.write().ok()?;
        for event_type in event_types.iter().copied() {
            listeners
                .entry(event_type)
                .or_insert_with(Vec::new)
                .push(tx.clone());
        }
        Some(rx)
    }

    /// Notify only listeners registered for the specific `ev`.
    pub fn notify_listeners(&self, ev: Event) {
        let key = ev.event_type();

        if let Ok(listeners) = self.listeners.read() {
            if let Some(vec) = listeners.get(&key) {
                for listener in vec.iter() {
                    match listener.try_send(ev.clone()) {
                        Ok(_) => {}
                        Err(TrySendError::Closed(_)) => {
                            warn!("Listener channel closed");
                        }
                        Err(TrySendError::Full(_)) => {}
                    }
                }
            }
        }
        if let Ok(mut listeners) = self.listeners.write() {
            // Remove closed senders and remove empty vectors
            listeners.retain(|_, v| {
                v.retain(|l| !l.is_closed());
                !v.is_empty()
            });
        }
    }

    pub fn has_listeners(&self) -> bool {
        self.listeners
            .read()
            .map(|listeners| !listeners.is_empty())
            .unwrap_or(false)
    }
}

/// Drains a receiver, returning how many events were waiting.
pub fn drain(receiver: &Receiver<Event>) -> usize {
    let mut count = 0;
    while receiver.try_recv().is_ok() {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_channel::TryRecvError;

    #[test]
    fn test_register_listener() {
        let manager = EventManager::new();

        let receiver = manager.register_listener(&[EventType::WaypointsChanged]);
        assert!(receiver.is_some());
        assert!(manager.has_listeners());
    }

    #[test]
    fn test_notify_listeners() {
        let manager = EventManager::new();

        let receiver = manager.register_listener(&[EventType::WaypointsChanged]).unwrap();
        manager.notify_listeners(Event::WaypointsChanged);

        match receiver.try_recv() {
            Ok(event) => assert_eq!(event, Event::WaypointsChanged),
            Err(_) => panic!("Expected event not received"),
        }
    }

    #[test]
    fn test_only_registered_types_delivered() {
        let manager = EventManager::new();

        let receiver = manager.register_listener(&[EventType::SummaryChanged]).unwrap();
        manager.notify_listeners(Event::WaypointsChanged);
        assert!(matches!(receiver.try_recv(), Err(TryRecvError::Empty)));

        manager.notify_listeners(Event::SummaryChanged);
        assert_eq!(receiver.try_recv().ok(), Some(Event::SummaryChanged));
    }

    #[test]
    fn test_notify_multiple_listeners() {
        let manager = EventManager::new();

        let receiver1 = manager.register_listener(&[EventType::AircraftChanged]).unwrap();
        let receiver2 = manager
            .register_listener(&[EventType::AircraftChanged, EventType::WindChanged])
            .unwrap();
        manager.notify_listeners(Event::AircraftChanged);
        manager.notify_listeners(Event::WindChanged);

        match receiver1.try_recv() {
            Ok(event) => assert_eq!(event, Event::AircraftChanged),
            Err(_) => panic!("Expected event not received by listener 1"),
        }
        assert!(receiver1.try_recv().is_err());

        assert_eq!(drain(&receiver2), 2);
    }

    #[test]
    fn test_listener_channel_closed() {
        let manager = EventManager::new();

        let receiver = manager.register_listener(&[EventType::WindChanged]).unwrap();
        drop(receiver); // Close the receiver

        manager.notify_listeners(Event::WindChanged);

        // Ensure no listeners are left
        assert!(!manager.has_listeners());
    }

    #[test]
    fn test_listener_channel_full() {
        let manager = EventManager::new();

        let (tx, rx) = async_channel::bounded::<Event>(1);
        manager
            .listeners
            .write()
            .unwrap()
            .entry(EventType::SummaryChanged)
            .or_insert_with(Vec::new)
            .push(tx);

        // Fill the channel
        manager.notify_listeners(Event::SummaryChanged);
        manager.notify_listeners(Event::SummaryChanged);

        match rx.try_recv() {
            Ok(event) => assert_eq!(event, Event::SummaryChanged),
            Err(_) => panic!("Expected event not received"),
        }

        // The second event should not be received because the channel is full
        match rx.try_recv() {
            Ok(_) => panic!("Unexpected event received"),
            Err(TryRecvError::Empty) => {}
            Err(_) => panic!("Unexpected error"),
        }
    }
}
