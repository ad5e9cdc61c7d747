use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{
    EventHandler,
    EventProducer,
    Handler,
    NotificationCoalescedEvent,
    NotificationCreatedEvent,
};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub notification_created_producer: Vec<EventProducer<NotificationCreatedEvent>>,
    pub notification_coalesced_producer: Vec<EventProducer<NotificationCoalescedEvent>>,
}

pub struct EventHandlers {
    pub on_notification_created: Option<EventHandler<NotificationCreatedEvent>>,
    pub on_notification_coalesced: Option<EventHandler<NotificationCoalescedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_notification_created = hooks.on_notification_created.map(|f| EventHandler::new(buffer_size, f));
        let on_notification_coalesced = hooks.on_notification_coalesced.map(|f| EventHandler::new(buffer_size, f));
        Self { on_notification_created, on_notification_coalesced }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_notification_created {
            result.notification_created_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_notification_coalesced {
            result.notification_coalesced_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_notification_created {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_notification_coalesced {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_notification_created: Option<Handler<NotificationCreatedEvent>>,
    pub on_notification_coalesced: Option<Handler<NotificationCoalescedEvent>>,
}

impl EventHooks {
    pub fn on_notification_created<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(NotificationCreatedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_notification_created = Some(Arc::new(f));
        self
    }

    pub fn on_notification_coalesced<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(NotificationCoalescedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_notification_coalesced = Some(Arc::new(f));
        self
    }
}
