//! Proximity interactions with announcement boards and NPCs
//!
//! Walking close to a zone opens its announcement; walking away again closes
//! it. Each zone has two radii: it starts inside `interaction_range` and only
//! ends beyond the larger `leave_range`, so standing on the boundary does not
//! flicker. Across the whole registry at most one zone is interacting.

use glam::Vec3;
use plaza_core::{ConfigError, ZoneId};
use tracing::{debug, info};

/// Default radius within which a zone starts an interaction
pub const DEFAULT_INTERACTION_RANGE: f32 = 3.0;
/// Default radius beyond which an active zone ends its interaction
pub const DEFAULT_LEAVE_RANGE: f32 = 4.0;

/// Display surface for announcements (a UI panel, an overlay, a log)
pub trait Messaging {
    /// Show `content`, replacing anything currently shown
    fn show_announcement(&mut self, content: &str);
    /// Hide the current announcement
    fn hide_announcement(&mut self);
}

impl<M: Messaging + ?Sized> Messaging for &mut M {
    fn show_announcement(&mut self, content: &str) {
        (**self).show_announcement(content);
    }

    fn hide_announcement(&mut self) {
        (**self).hide_announcement();
    }
}

impl<M: Messaging + ?Sized> Messaging for Box<M> {
    fn show_announcement(&mut self, content: &str) {
        (**self).show_announcement(content);
    }

    fn hide_announcement(&mut self) {
        (**self).hide_announcement();
    }
}

/// Messaging backend that writes announcements to the log
#[derive(Debug, Default)]
pub struct LogMessaging {
    visible: Option<String>,
}

impl LogMessaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announcement currently on screen
    pub fn visible(&self) -> Option<&str> {
        self.visible.as_deref()
    }
}

impl Messaging for LogMessaging {
    fn show_announcement(&mut self, content: &str) {
        info!("Announcement shown:\n{}", content);
        self.visible = Some(content.to_string());
    }

    fn hide_announcement(&mut self) {
        if self.visible.take().is_some() {
            info!("Announcement hidden");
        }
    }
}

/// Text displayed while a zone is interacting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub title: String,
    pub body: String,
}

impl Announcement {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// The kind of interactable zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneKind {
    /// A notice board
    Board,
    /// A character that speaks when approached
    Npc { name: String },
}

/// Interaction state of a single zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZoneState {
    #[default]
    Idle,
    Interacting,
}

/// A proximity-triggered zone in the world
#[derive(Debug, Clone)]
pub struct InteractableZone {
    kind: ZoneKind,
    position: Vec3,
    interaction_range: f32,
    leave_range: f32,
    announcement: Announcement,
    state: ZoneState,
}

impl InteractableZone {
    /// Create a zone, checking that `leave_range > interaction_range > 0`
    pub fn new(
        kind: ZoneKind,
        position: Vec3,
        interaction_range: f32,
        leave_range: f32,
        announcement: Announcement,
    ) -> Result<Self, ConfigError> {
        if !interaction_range.is_finite() || interaction_range <= 0.0 {
            return Err(ConfigError::InvalidInteractionRange(interaction_range));
        }
        if !leave_range.is_finite() || leave_range <= interaction_range {
            return Err(ConfigError::LeaveRangeTooSmall {
                interaction_range,
                leave_range,
            });
        }
        Ok(Self {
            kind,
            position,
            interaction_range,
            leave_range,
            announcement,
            state: ZoneState::Idle,
        })
    }

    /// Create a notice board with default ranges
    pub fn board(position: Vec3, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: ZoneKind::Board,
            position,
            interaction_range: DEFAULT_INTERACTION_RANGE,
            leave_range: DEFAULT_LEAVE_RANGE,
            announcement: Announcement::new(title, body),
            state: ZoneState::Idle,
        }
    }

    /// Create an NPC with default ranges
    pub fn npc(
        position: Vec3,
        name: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            kind: ZoneKind::Npc { name: name.into() },
            ..Self::board(position, title, body)
        }
    }

    /// Same zone with different ranges
    pub fn with_ranges(self, interaction_range: f32, leave_range: f32) -> Result<Self, ConfigError> {
        Self::new(
            self.kind,
            self.position,
            interaction_range,
            leave_range,
            self.announcement,
        )
    }

    pub fn kind(&self) -> &ZoneKind {
        &self.kind
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn interaction_range(&self) -> f32 {
        self.interaction_range
    }

    pub fn leave_range(&self) -> f32 {
        self.leave_range
    }

    pub fn announcement(&self) -> &Announcement {
        &self.announcement
    }

    pub fn state(&self) -> ZoneState {
        self.state
    }

    pub fn is_interacting(&self) -> bool {
        self.state == ZoneState::Interacting
    }

    /// Text handed to the messaging backend
    pub fn formatted_content(&self) -> String {
        let Announcement { title, body } = &self.announcement;
        match &self.kind {
            ZoneKind::Board => format!("{title}\n\n{body}"),
            ZoneKind::Npc { name } => format!("{title}\n\n{name}: \"{body}\""),
        }
    }

    /// Whether the player is close enough to start
    pub fn in_interaction_range(&self, player: Vec3) -> bool {
        player.distance(self.position) < self.interaction_range
    }

    /// Whether the player has walked far enough away to end
    pub fn beyond_leave_range(&self, player: Vec3) -> bool {
        player.distance(self.position) > self.leave_range
    }

    /// Show the announcement. Does nothing if already interacting.
    pub fn start_interaction(&mut self, messaging: &mut dyn Messaging) -> bool {
        if self.is_interacting() {
            return false;
        }
        self.state = ZoneState::Interacting;
        messaging.show_announcement(&self.formatted_content());
        true
    }

    /// Hide the announcement. Does nothing if idle.
    pub fn end_interaction(&mut self, messaging: &mut dyn Messaging) -> bool {
        if !self.is_interacting() {
            return false;
        }
        self.state = ZoneState::Idle;
        messaging.hide_announcement();
        true
    }
}

/// A zone transition produced by a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    Started(ZoneId),
    Ended(ZoneId),
}

#[derive(Debug, Clone)]
struct ZoneEntry {
    id: ZoneId,
    zone: InteractableZone,
}

/// Ordered collection of the zones of one world. Registration order breaks
/// ties when several zones are in range at once.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    entries: Vec<ZoneEntry>,
    next_id: u64,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone. Zones always enter the registry idle.
    pub fn add(&mut self, mut zone: InteractableZone) -> ZoneId {
        zone.state = ZoneState::Idle;
        let id = ZoneId(self.next_id);
        self.next_id += 1;
        self.entries.push(ZoneEntry { id, zone });
        id
    }

    /// Unregister a zone, closing its announcement first if it is active
    pub fn remove(&mut self, id: ZoneId, messaging: &mut dyn Messaging) -> Option<InteractableZone> {
        let index = self.index_of(id)?;
        let mut entry = self.entries.remove(index);
        entry.zone.end_interaction(messaging);
        Some(entry.zone)
    }

    /// Remove every zone, closing the active announcement if any
    pub fn clear(&mut self, messaging: &mut dyn Messaging) {
        for entry in &mut self.entries {
            entry.zone.end_interaction(messaging);
        }
        self.entries.clear();
    }

    pub fn get(&self, id: ZoneId) -> Option<&InteractableZone> {
        self.index_of(id).map(|index| &self.entries[index].zone)
    }

    /// Zones in registration order
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, &InteractableZone)> {
        self.entries.iter().map(|entry| (entry.id, &entry.zone))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The zone currently interacting
    pub fn active(&self) -> Option<ZoneId> {
        self.entries
            .iter()
            .find(|entry| entry.zone.is_interacting())
            .map(|entry| entry.id)
    }

    /// Number of interacting zones (never more than one)
    pub fn active_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.zone.is_interacting())
            .count()
    }

    fn index_of(&self, id: ZoneId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

/// Run one frame of the proximity state machine.
///
/// An active zone is only checked for leaving; if it stays active nothing
/// else can start. Without an active zone, the first zone in registry order
/// with the player inside its interaction range starts.
pub fn check_interactions(
    player: Vec3,
    zones: &mut ZoneRegistry,
    messaging: &mut dyn Messaging,
) -> Option<InteractionEvent> {
    if let Some(entry) = zones.entries.iter_mut().find(|e| e.zone.is_interacting()) {
        if entry.zone.beyond_leave_range(player) {
            entry.zone.end_interaction(messaging);
            return Some(InteractionEvent::Ended(entry.id));
        }
        return None;
    }

    let entry = zones
        .entries
        .iter_mut()
        .find(|e| e.zone.in_interaction_range(player))?;
    entry.zone.start_interaction(messaging);
    Some(InteractionEvent::Started(entry.id))
}

/// Owns the zones of a world session and the messaging backend they display on
pub struct ProximityInteractionManager<M: Messaging> {
    registry: ZoneRegistry,
    messaging: M,
}

impl<M: Messaging> ProximityInteractionManager<M> {
    pub fn new(messaging: M) -> Self {
        Self::with_registry(ZoneRegistry::new(), messaging)
    }

    pub fn with_registry(registry: ZoneRegistry, messaging: M) -> Self {
        Self {
            registry,
            messaging,
        }
    }

    pub fn add_zone(&mut self, zone: InteractableZone) -> ZoneId {
        self.registry.add(zone)
    }

    /// Remove a zone, ending its interaction first
    pub fn remove_zone(&mut self, id: ZoneId) -> Option<InteractableZone> {
        let zone = self.registry.remove(id, &mut self.messaging)?;
        debug!(%id, "Zone removed");
        Some(zone)
    }

    /// Evaluate zone transitions for the player's position this frame
    pub fn update(&mut self, player: Vec3) -> Option<InteractionEvent> {
        let event = check_interactions(player, &mut self.registry, &mut self.messaging);
        match event {
            Some(InteractionEvent::Started(id)) => debug!(%id, "Interaction started"),
            Some(InteractionEvent::Ended(id)) => debug!(%id, "Interaction ended"),
            None => {}
        }
        event
    }

    /// Start a zone explicitly. Any other active zone is ended first so only
    /// one stays active. Returns false if the zone is unknown or already active.
    pub fn start_interaction(&mut self, id: ZoneId) -> bool {
        let Some(index) = self.registry.index_of(id) else {
            return false;
        };
        if self.registry.entries[index].zone.is_interacting() {
            return false;
        }
        self.end_all();
        self.registry.entries[index]
            .zone
            .start_interaction(&mut self.messaging)
    }

    /// End a zone explicitly. Returns false if it was not active.
    pub fn end_interaction(&mut self, id: ZoneId) -> bool {
        let Some(index) = self.registry.index_of(id) else {
            return false;
        };
        self.registry.entries[index]
            .zone
            .end_interaction(&mut self.messaging)
    }

    /// End whichever zone is active
    pub fn end_all(&mut self) -> Option<ZoneId> {
        let id = self.registry.active()?;
        self.end_interaction(id);
        Some(id)
    }

    pub fn active(&self) -> Option<ZoneId> {
        self.registry.active()
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn messaging(&self) -> &M {
        &self.messaging
    }

    pub fn messaging_mut(&mut self) -> &mut M {
        &mut self.messaging
    }
}

impl<M: Messaging> Drop for ProximityInteractionManager<M> {
    fn drop(&mut self) {
        self.end_all();
    }
}
