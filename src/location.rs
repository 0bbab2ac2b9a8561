//! Map marker lifecycle for the report form.
//!
//! `LocationCapture` reacts to abstract map events (click, drag start/move/end, teardown),
//! keeps at most one marker per map session and resolves each new marker position to an
//! address in a background task. Only the most recently initiated resolution may reach the
//! caller; anything older, or anything arriving after teardown, is dropped.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::api::Location;
use crate::geocode::ReverseGeocoder;

/// Input events from whatever map widget hosts the capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    Click { lat: f64, lng: f64 },
    DragStart,
    /// Pointer moved while dragging; the marker follows without resolving.
    DragMove { lat: f64, lng: f64 },
    DragEnd { lat: f64, lng: f64 },
    Teardown,
}

/// Marker state for one map session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    None,
    Placed { lat: f64, lng: f64 },
    Dragging { lat: f64, lng: f64 },
    TornDown,
}

impl Marker {
    pub fn position(&self) -> Option<(f64, f64)> {
        match *self {
            Marker::Placed { lat, lng } | Marker::Dragging { lat, lng } => Some((lat, lng)),
            Marker::None | Marker::TornDown => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Marker::Dragging { .. })
    }
}

#[derive(Debug)]
struct Resolution {
    generation: u64,
    lat: f64,
    lng: f64,
    address: String,
}

pub struct LocationCapture {
    geocoder: Arc<dyn ReverseGeocoder>,
    marker: Marker,
    /// Incremented every time a resolution is started
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Resolution>,
    rx: mpsc::UnboundedReceiver<Resolution>,
    selected: Option<Location>,
}

impl LocationCapture {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            geocoder,
            marker: Marker::None,
            generation: 0,
            pending: None,
            tx,
            rx,
            selected: None,
        }
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Latest location delivered to the caller.
    pub fn selected(&self) -> Option<&Location> {
        self.selected.as_ref()
    }

    /// Whether the current marker position is still being resolved.
    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply a map event to the marker state machine.
    pub fn handle(&mut self, event: MapEvent) {
        match (self.marker, event) {
            (Marker::TornDown, _) => trace!(?event, "Map torn down, ignoring event"),
            (_, MapEvent::Teardown) => self.teardown(),
            (Marker::None | Marker::Placed { .. }, MapEvent::Click { lat, lng }) => {
                self.marker = Marker::Placed { lat, lng };
                self.resolve(lat, lng);
            }
            (Marker::Placed { lat, lng }, MapEvent::DragStart) => {
                self.marker = Marker::Dragging { lat, lng };
            }
            (Marker::Dragging { .. }, MapEvent::DragMove { lat, lng }) => {
                self.marker = Marker::Dragging { lat, lng };
            }
            (Marker::Dragging { .. }, MapEvent::DragEnd { lat, lng }) => {
                self.marker = Marker::Placed { lat, lng };
                self.resolve(lat, lng);
            }
            (marker, event) => trace!(?marker, ?event, "Event does not apply to marker state"),
        }
    }

    /// Drain finished resolutions and return the newest accepted location, if any.
    pub fn poll(&mut self) -> Option<Location> {
        let mut latest = None;
        while let Ok(resolution) = self.rx.try_recv() {
            if let Some(location) = self.accept(resolution) {
                latest = Some(location);
            }
        }
        latest
    }

    /// Wait for the resolution of the current marker position.
    ///
    /// Returns `None` once the capture has been torn down, or when no resolution is in flight.
    pub async fn next_location(&mut self) -> Option<Location> {
        loop {
            if self.marker == Marker::TornDown || self.pending.is_none() {
                return None;
            }
            let resolution = self.rx.recv().await?;
            if let Some(location) = self.accept(resolution) {
                return Some(location);
            }
        }
    }

    fn resolve(&mut self, lat: f64, lng: f64) {
        self.generation += 1;
        let generation = self.generation;
        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            let address = geocoder.reverse_geocode(lat, lng).await;
            let _ = tx.send(Resolution {
                generation,
                lat,
                lng,
                address,
            });
        });

        if let Some(superseded) = self.pending.replace(handle) {
            superseded.abort();
        }
    }

    fn accept(&mut self, resolution: Resolution) -> Option<Location> {
        if self.marker == Marker::TornDown {
            return None;
        }
        if resolution.generation != self.generation {
            debug!(
                stale = resolution.generation,
                current = self.generation,
                "Discarding superseded geocode resolution"
            );
            return None;
        }

        self.pending = None;
        let location = Location {
            latitude: resolution.lat,
            longitude: resolution.lng,
            address: resolution.address,
        };
        self.selected = Some(location.clone());
        Some(location)
    }

    fn teardown(&mut self) {
        debug!("Tearing down location capture");
        self.marker = Marker::TornDown;
        self.selected = None;
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        while self.rx.try_recv().is_ok() {}
    }
}

impl Drop for LocationCapture {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
