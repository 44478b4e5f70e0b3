//! # Chat View State
//!
//! A single-conversation message log with optimistic local echo. Outgoing
//! messages walk `sent → delivered → read` on scheduled local transitions;
//! there is no remote acknowledgement anywhere in this system. Typing
//! presence is likewise simulated on the same task queue.
//!
//! All timers are scoped: they live in the state's [`TaskQueue`] and are
//! dropped by [`ChatState::teardown`], so nothing fires after the screen is
//! gone. Tests drive the queue on a virtual clock.

use crate::session::Sender;
use mingle_core::identifiers::{ConversationId, MessageId, UserId};
use mingle_core::time::EpochMs;
use mingle_effects::TaskQueue;
use serde::{Deserialize, Serialize};

/// Placeholder duration for simulated voice capture.
const VOICE_PLACEHOLDER_DURATION: &str = "0:03";

// ============================================================================
// Message Delivery Status
// ============================================================================

/// Delivery status of an outgoing message.
///
/// Monotonically non-decreasing for a given message once created: the only
/// mutation path is [`DeliveryStatus::advance_to`], which never regresses.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DeliveryStatus {
    /// Appended locally and "sent".
    #[default]
    Sent,
    /// Reached the other party's device (simulated).
    Delivered,
    /// Seen by the other party (simulated).
    Read,
}

impl DeliveryStatus {
    /// Status indicator character for display.
    #[must_use]
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Sent => "✓",
            Self::Delivered => "✓✓",
            Self::Read => "✓✓", // colored by the frontend
        }
    }

    /// Short description for the status.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Delivered => "Delivered",
            Self::Read => "Read",
        }
    }

    /// Whether the message has reached the recipient.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered | Self::Read)
    }

    /// Whether the message has been read.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read)
    }

    /// Advance to `next` if that is a forward step. Returns `true` on change.
    pub fn advance_to(&mut self, next: DeliveryStatus) -> bool {
        if next > *self {
            *self = next;
            true
        } else {
            false
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Kind of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Plain text.
    Text,
    /// Inline image.
    Image,
    /// Generic file attachment.
    File,
    /// Voice note.
    Voice,
}

impl MessageKind {
    /// Lowercase label used in reply summaries and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::File => "file",
            Self::Voice => "voice",
        }
    }
}

/// Content payload of a message, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePayload {
    /// Plain text.
    Text {
        /// The message text.
        text: String,
    },
    /// Inline image.
    Image {
        /// Image URL.
        url: String,
    },
    /// Generic file attachment.
    File {
        /// File URL.
        url: String,
        /// Original file name.
        name: String,
        /// Size in bytes.
        size_bytes: u64,
    },
    /// Voice note.
    Voice {
        /// Audio URL.
        url: String,
        /// Display duration, e.g. "0:45".
        duration: String,
    },
}

impl MessagePayload {
    /// The kind tag for this payload.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Text { .. } => MessageKind::Text,
            Self::Image { .. } => MessageKind::Image,
            Self::File { .. } => MessageKind::File,
            Self::Voice { .. } => MessageKind::Voice,
        }
    }

    /// One-line summary: the text for text messages, the kind label
    /// otherwise. Used for reply previews.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            other => other.kind().label().to_string(),
        }
    }

    /// The text a search query runs against: the body for text messages,
    /// the file name for attachments. Images and voice notes carry no
    /// searchable text of their own.
    #[must_use]
    pub fn searchable_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::File { name, .. } => Some(name),
            Self::Image { .. } | Self::Voice { .. } => None,
        }
    }
}

/// A reaction entry: one emoji with its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// The emoji.
    pub emoji: String,
    /// How many times it was applied.
    pub count: u32,
}

/// Lightweight reference to the message being replied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyContext {
    /// The original message.
    pub message_id: MessageId,
    /// Its sender's display name.
    pub sender_name: String,
    /// Content-or-kind summary.
    pub summary: String,
}

/// A chat message.
///
/// The log is append-only: identity and payload never change after the
/// append; delivery status and reactions are the only mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier.
    pub id: MessageId,
    /// Content payload.
    pub payload: MessagePayload,
    /// Sender identifier.
    pub sender_id: UserId,
    /// Sender display name.
    pub sender_name: String,
    /// When the message was appended (ms since epoch).
    pub timestamp: EpochMs,
    /// Delivery status.
    pub status: DeliveryStatus,
    /// Reply reference, if this message answers another.
    pub reply_to: Option<ReplyContext>,
    /// Reaction entries in first-applied order.
    pub reactions: Vec<Reaction>,
}

impl Message {
    /// The kind tag of this message.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        self.payload.kind()
    }
}

// ============================================================================
// Conversation
// ============================================================================

/// Conversation metadata shown in the chat header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation identifier.
    pub id: ConversationId,
    /// Display name.
    pub name: String,
    /// Whether this is a group conversation.
    pub is_group: bool,
    /// Member list for groups; the single peer for direct messages.
    pub members: Vec<ConversationMember>,
    /// Avatar reference.
    pub avatar_url: Option<String>,
    /// "Last seen" display text.
    pub last_seen: Option<String>,
}

/// A member of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMember {
    /// Member identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

// ============================================================================
// Timings and scheduled tasks
// ============================================================================

/// Delays for the simulated status and presence transitions.
///
/// Loadable from configuration; the defaults are the product's stock values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTimings {
    /// Delay from send to `delivered`.
    pub delivered_after_ms: u64,
    /// Further delay from `delivered` to `read`.
    pub read_after_ms: u64,
    /// Delay from conversation open to the typing indicator appearing.
    pub typing_show_after_ms: u64,
    /// Further delay until the typing indicator clears.
    pub typing_clear_after_ms: u64,
}

impl Default for ChatTimings {
    fn default() -> Self {
        Self {
            delivered_after_ms: 1_000,
            read_after_ms: 2_000,
            typing_show_after_ms: 2_000,
            typing_clear_after_ms: 3_000,
        }
    }
}

/// Scheduled local transition applied when its delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTask {
    /// Advance a message to `delivered`.
    MarkDelivered(MessageId),
    /// Advance a message to `read`.
    MarkRead(MessageId),
    /// Show the simulated typing indicator.
    ShowTyping,
    /// Clear the typing indicator.
    ClearTyping,
}

// ============================================================================
// Search and lightbox cursors
// ============================================================================

/// In-conversation message search with cursor navigation.
///
/// The cursor stops at the ends: first/last results do not cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSearch {
    /// The query.
    pub query: String,
    /// Matching message ids in log order.
    pub results: Vec<MessageId>,
    /// Cursor position within `results`.
    pub index: usize,
}

impl MessageSearch {
    /// The message the cursor points at.
    #[must_use]
    pub fn current(&self) -> Option<MessageId> {
        self.results.get(self.index).copied()
    }

    /// Move forward; stops at the last result.
    pub fn next(&mut self) -> Option<MessageId> {
        if self.index + 1 < self.results.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Move backward; stops at the first result.
    pub fn previous(&mut self) -> Option<MessageId> {
        self.index = self.index.saturating_sub(1);
        self.current()
    }
}

/// Full-screen image viewer over the image-kind subsequence of the log.
///
/// Unlike search, next/previous wrap around modulo the image count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lightbox {
    /// Image messages in log order.
    pub images: Vec<MessageId>,
    /// Index of the image currently shown.
    pub index: usize,
}

impl Lightbox {
    /// The image currently shown.
    #[must_use]
    pub fn current(&self) -> Option<MessageId> {
        self.images.get(self.index).copied()
    }

    /// Advance, wrapping at the end.
    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    /// Go back, wrapping at the start.
    pub fn previous(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
        }
    }
}

// ============================================================================
// ChatState
// ============================================================================

/// Chat screen state: one conversation, one ordered message log.
///
/// All operations take the evaluation time explicitly; the screen drives the
/// scheduled transitions by calling [`ChatState::advance_to`] with its clock.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    /// The open conversation.
    pub conversation: Option<Conversation>,
    messages: Vec<Message>,
    /// Active reply context, attached to the next send.
    pub reply_context: Option<ReplyContext>,
    /// Names currently shown as typing.
    pub typing: Vec<ConversationMember>,
    /// Whether voice recording is in progress.
    pub is_recording: bool,
    /// Transition delays.
    pub timings: ChatTimings,
    /// Active message search, if the search bar is open.
    pub search: Option<MessageSearch>,
    /// Open image lightbox, if any.
    pub lightbox: Option<Lightbox>,
    tasks: TaskQueue<ChatTask>,
}

impl ChatState {
    /// Create an empty chat state with default timings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The append-only message log, in order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get a message by id.
    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == *id)
    }

    /// Pending scheduled transitions. Exposed for tests and host ticking.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending()
    }

    /// Due time of the next scheduled transition, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<EpochMs> {
        self.tasks.next_due()
    }

    // ─── Lifecycle ───────────────────────────────────────────

    /// Open a conversation: reset transient state and schedule the simulated
    /// typing indicator.
    pub fn open(&mut self, conversation: Conversation, now: EpochMs) {
        self.teardown();
        self.conversation = Some(conversation);
        self.tasks
            .schedule(now, self.timings.typing_show_after_ms, ChatTask::ShowTyping);
    }

    /// Tear the screen down: every pending timer is dropped so no transition
    /// can mutate state after disposal.
    pub fn teardown(&mut self) {
        self.tasks.clear();
        self.typing.clear();
        self.reply_context = None;
        self.search = None;
        self.lightbox = None;
        self.is_recording = false;
    }

    /// Apply every scheduled transition due at or before `now`.
    pub fn advance_to(&mut self, now: EpochMs) {
        for task in self.tasks.pop_due(now) {
            match task {
                ChatTask::MarkDelivered(id) => {
                    self.advance_status(&id, DeliveryStatus::Delivered);
                }
                ChatTask::MarkRead(id) => {
                    self.advance_status(&id, DeliveryStatus::Read);
                }
                ChatTask::ShowTyping => {
                    self.typing = self
                        .conversation
                        .as_ref()
                        .map(|c| c.members.clone())
                        .unwrap_or_default();
                    self.tasks
                        .schedule(now, self.timings.typing_clear_after_ms, ChatTask::ClearTyping);
                }
                ChatTask::ClearTyping => self.typing.clear(),
            }
        }
    }

    fn advance_status(&mut self, id: &MessageId, next: DeliveryStatus) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == *id) {
            message.status.advance_to(next);
        }
    }

    // ─── Sending ─────────────────────────────────────────────

    /// Append a text message from the current user.
    ///
    /// A draft that is empty after trimming is silently rejected. The active
    /// reply context is attached to the message and cleared. Delivery and
    /// read transitions are scheduled relative to `now`.
    pub fn send_message(&mut self, draft: &str, sender: &Sender, now: EpochMs) -> Option<MessageId> {
        let text = draft.trim();
        if text.is_empty() {
            return None;
        }
        let payload = MessagePayload::Text {
            text: text.to_string(),
        };
        Some(self.append_outgoing(payload, sender, now))
    }

    /// Append an attachment message; images get their own kind.
    pub fn attach_file(
        &mut self,
        name: &str,
        mime_type: &str,
        size_bytes: u64,
        url: &str,
        sender: &Sender,
        now: EpochMs,
    ) -> MessageId {
        let payload = if mime_type.starts_with("image/") {
            MessagePayload::Image {
                url: url.to_string(),
            }
        } else {
            MessagePayload::File {
                url: url.to_string(),
                name: name.to_string(),
                size_bytes,
            }
        };
        self.append_outgoing(payload, sender, now)
    }

    fn append_outgoing(
        &mut self,
        payload: MessagePayload,
        sender: &Sender,
        now: EpochMs,
    ) -> MessageId {
        let message = Message {
            id: MessageId::new(),
            payload,
            sender_id: sender.id,
            sender_name: sender.name.clone(),
            timestamp: now,
            status: DeliveryStatus::Sent,
            reply_to: self.reply_context.take(),
            reactions: Vec::new(),
        };
        let id = message.id;
        self.messages.push(message);
        self.tasks
            .schedule(now, self.timings.delivered_after_ms, ChatTask::MarkDelivered(id));
        self.tasks.schedule(
            now,
            self.timings.delivered_after_ms + self.timings.read_after_ms,
            ChatTask::MarkRead(id),
        );
        id
    }

    // ─── Reactions and replies ───────────────────────────────

    /// Apply an emoji reaction: increment an existing entry or append a new
    /// one with count 1. There is no removal path.
    pub fn react(&mut self, message_id: &MessageId, emoji: &str) -> bool {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == *message_id) else {
            return false;
        };
        if let Some(reaction) = message.reactions.iter_mut().find(|r| r.emoji == emoji) {
            reaction.count += 1;
        } else {
            message.reactions.push(Reaction {
                emoji: emoji.to_string(),
                count: 1,
            });
        }
        true
    }

    /// Set the reply context from an existing message.
    pub fn set_reply(&mut self, message_id: &MessageId) -> bool {
        let Some(message) = self.message(message_id) else {
            return false;
        };
        self.reply_context = Some(ReplyContext {
            message_id: message.id,
            sender_name: message.sender_name.clone(),
            summary: message.payload.summary(),
        });
        true
    }

    /// Explicitly cancel the reply context.
    pub fn cancel_reply(&mut self) {
        self.reply_context = None;
    }

    // ─── Voice recording ─────────────────────────────────────

    /// Start voice recording.
    pub fn start_recording(&mut self) {
        self.is_recording = true;
    }

    /// Stop recording and append a synthesized voice message.
    ///
    /// The duration is a fixed placeholder; there is no real audio capture.
    /// A stop without a matching start is a no-op.
    pub fn stop_recording(&mut self, sender: &Sender, now: EpochMs) -> Option<MessageId> {
        if !self.is_recording {
            return None;
        }
        self.is_recording = false;
        let payload = MessagePayload::Voice {
            url: "voice_message_url".to_string(),
            duration: VOICE_PLACEHOLDER_DURATION.to_string(),
        };
        Some(self.append_outgoing(payload, sender, now))
    }

    // ─── Search ──────────────────────────────────────────────

    /// The ordered subsequence of messages matching `query` in text content,
    /// file name, or sender name, case-insensitively. Pure.
    #[must_use]
    pub fn find_messages(&self, query: &str) -> Vec<&Message> {
        let q = query.to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.messages
            .iter()
            .filter(|m| {
                m.payload
                    .searchable_text()
                    .is_some_and(|text| text.to_lowercase().contains(&q))
                    || m.sender_name.to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Open or update the search bar with a query; the cursor resets to the
    /// first result.
    pub fn set_search_query(&mut self, query: &str) {
        let results = self.find_messages(query).iter().map(|m| m.id).collect();
        self.search = Some(MessageSearch {
            query: query.to_string(),
            results,
            index: 0,
        });
    }

    /// Close the search bar.
    pub fn close_search(&mut self) {
        self.search = None;
    }

    // ─── Lightbox ────────────────────────────────────────────

    /// Open the image lightbox positioned at the clicked message.
    ///
    /// The image subsequence is snapshotted in log order; a non-image or
    /// unknown id positions the cursor at the first image.
    pub fn open_lightbox(&mut self, message_id: &MessageId) -> bool {
        let images: Vec<MessageId> = self
            .messages
            .iter()
            .filter(|m| m.kind() == MessageKind::Image)
            .map(|m| m.id)
            .collect();
        if images.is_empty() {
            return false;
        }
        let index = images.iter().position(|id| id == message_id).unwrap_or(0);
        self.lightbox = Some(Lightbox { images, index });
        true
    }

    /// Close the lightbox.
    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Sender;

    fn sender() -> Sender {
        Sender {
            id: UserId::new(),
            name: "You".to_string(),
        }
    }

    fn peer_conversation() -> Conversation {
        Conversation {
            id: ConversationId::new(),
            name: "Emma Wilson".to_string(),
            is_group: false,
            members: vec![ConversationMember {
                id: UserId::new(),
                name: "Emma Wilson".to_string(),
            }],
            avatar_url: None,
            last_seen: Some("last seen recently".to_string()),
        }
    }

    #[test]
    fn send_appends_one_sent_message() {
        let mut chat = ChatState::new();
        let id = chat.send_message("hi", &sender(), 0).unwrap();
        assert_eq!(chat.messages().len(), 1);
        let message = chat.message(&id).unwrap();
        assert_eq!(message.status, DeliveryStatus::Sent);
        assert_eq!(
            message.payload,
            MessagePayload::Text {
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn empty_draft_is_silently_rejected() {
        let mut chat = ChatState::new();
        assert!(chat.send_message("   \n\t ", &sender(), 0).is_none());
        assert!(chat.messages().is_empty());
        assert_eq!(chat.pending_tasks(), 0);
    }

    #[test]
    fn draft_is_trimmed() {
        let mut chat = ChatState::new();
        let id = chat.send_message("  hello  ", &sender(), 0).unwrap();
        assert_eq!(
            chat.message(&id).unwrap().payload,
            MessagePayload::Text {
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn status_walks_sent_delivered_read_without_regressing() {
        let mut chat = ChatState::new();
        let id = chat.send_message("hi", &sender(), 0).unwrap();

        chat.advance_to(999);
        assert_eq!(chat.message(&id).unwrap().status, DeliveryStatus::Sent);

        chat.advance_to(1_000);
        assert_eq!(chat.message(&id).unwrap().status, DeliveryStatus::Delivered);

        chat.advance_to(3_000);
        assert_eq!(chat.message(&id).unwrap().status, DeliveryStatus::Read);

        // A stale delivered transition can never pull the status back.
        let mut status = chat.message(&id).unwrap().status;
        assert!(!status.advance_to(DeliveryStatus::Delivered));
        assert_eq!(status, DeliveryStatus::Read);
    }

    #[test]
    fn skipping_straight_to_read_applies_both_transitions() {
        let mut chat = ChatState::new();
        let id = chat.send_message("hi", &sender(), 0).unwrap();
        // A long gap between ticks must not lose transitions.
        chat.advance_to(60_000);
        assert_eq!(chat.message(&id).unwrap().status, DeliveryStatus::Read);
        assert_eq!(chat.pending_tasks(), 0);
    }

    #[test]
    fn log_is_append_only_across_sends() {
        let mut chat = ChatState::new();
        let first = chat.send_message("one", &sender(), 0).unwrap();
        let first_snapshot = chat.message(&first).unwrap().clone();
        chat.send_message("two", &sender(), 10).unwrap();

        let replayed = chat.message(&first).unwrap();
        assert_eq!(replayed.payload, first_snapshot.payload);
        assert_eq!(replayed.timestamp, first_snapshot.timestamp);
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn react_twice_merges_into_one_entry() {
        let mut chat = ChatState::new();
        let id = chat.send_message("hi", &sender(), 0).unwrap();
        assert!(chat.react(&id, "👍"));
        assert!(chat.react(&id, "👍"));
        let reactions = &chat.message(&id).unwrap().reactions;
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].count, 2);

        chat.react(&id, "❤️");
        assert_eq!(chat.message(&id).unwrap().reactions.len(), 2);
    }

    #[test]
    fn reply_context_attaches_to_next_send_then_clears() {
        let mut chat = ChatState::new();
        let original = chat.send_message("original", &sender(), 0).unwrap();

        assert!(chat.set_reply(&original));
        let reply = chat.send_message("answer", &sender(), 10).unwrap();

        let context = chat.message(&reply).unwrap().reply_to.clone().unwrap();
        assert_eq!(context.message_id, original);
        assert_eq!(context.summary, "original");
        assert!(chat.reply_context.is_none());
    }

    #[test]
    fn reply_summary_for_non_text_is_the_kind_label() {
        let mut chat = ChatState::new();
        let id = chat.attach_file("pic.png", "image/png", 10, "url", &sender(), 0);
        chat.set_reply(&id);
        assert_eq!(chat.reply_context.as_ref().unwrap().summary, "image");
    }

    #[test]
    fn cancel_reply_clears_context() {
        let mut chat = ChatState::new();
        let id = chat.send_message("x", &sender(), 0).unwrap();
        chat.set_reply(&id);
        chat.cancel_reply();
        assert!(chat.reply_context.is_none());
    }

    #[test]
    fn attachment_kind_follows_media_type() {
        let mut chat = ChatState::new();
        let image = chat.attach_file("a.jpg", "image/jpeg", 5, "u1", &sender(), 0);
        let file = chat.attach_file("a.pdf", "application/pdf", 5, "u2", &sender(), 0);
        assert_eq!(chat.message(&image).unwrap().kind(), MessageKind::Image);
        assert_eq!(chat.message(&file).unwrap().kind(), MessageKind::File);
    }

    #[test]
    fn recording_toggles_and_synthesizes_a_voice_note() {
        let mut chat = ChatState::new();
        assert!(chat.stop_recording(&sender(), 0).is_none());

        chat.start_recording();
        assert!(chat.is_recording);
        let id = chat.stop_recording(&sender(), 0).unwrap();
        assert!(!chat.is_recording);
        match &chat.message(&id).unwrap().payload {
            MessagePayload::Voice { duration, .. } => assert_eq!(duration, "0:03"),
            other => panic!("expected voice payload, got {other:?}"),
        }
    }

    #[test]
    fn typing_indicator_appears_then_clears() {
        let mut chat = ChatState::new();
        chat.open(peer_conversation(), 0);

        chat.advance_to(1_999);
        assert!(chat.typing.is_empty());

        chat.advance_to(2_000);
        assert_eq!(chat.typing.len(), 1);
        assert_eq!(chat.typing[0].name, "Emma Wilson");

        chat.advance_to(4_999);
        assert!(!chat.typing.is_empty());
        chat.advance_to(5_000);
        assert!(chat.typing.is_empty());
    }

    #[test]
    fn teardown_drops_pending_timers() {
        let mut chat = ChatState::new();
        chat.open(peer_conversation(), 0);
        let id = chat.send_message("hi", &sender(), 0).unwrap();
        assert!(chat.pending_tasks() > 0);

        chat.teardown();
        assert_eq!(chat.pending_tasks(), 0);

        // Nothing fires after disposal.
        chat.advance_to(60_000);
        assert_eq!(chat.message(&id).unwrap().status, DeliveryStatus::Sent);
        assert!(chat.typing.is_empty());
    }

    #[test]
    fn search_matches_content_or_sender_in_order() {
        let mut chat = ChatState::new();
        let me = sender();
        chat.send_message("the weather is nice", &me, 0);
        chat.send_message("unrelated", &me, 1);
        chat.send_message("Weather again", &me, 2);

        let results = chat.find_messages("weather");
        assert_eq!(results.len(), 2);
        assert!(results[0].timestamp < results[1].timestamp);

        // Sender-name matches count too.
        assert_eq!(chat.find_messages("you").len(), 3);
        assert!(chat.find_messages("").is_empty());
    }

    #[test]
    fn file_messages_are_searched_by_name_not_kind_label() {
        let mut chat = ChatState::new();
        let me = Sender {
            id: UserId::new(),
            name: "Alex".to_string(),
        };
        chat.attach_file("quarterly-report.pdf", "application/pdf", 9, "u", &me, 0);

        assert_eq!(chat.find_messages("quarterly").len(), 1);
        // The kind label is not content.
        assert!(chat.find_messages("file").is_empty());
    }

    #[test]
    fn search_cursor_stops_at_the_ends() {
        let mut chat = ChatState::new();
        let me = sender();
        let a = chat.send_message("match a", &me, 0).unwrap();
        let b = chat.send_message("match b", &me, 1).unwrap();

        chat.set_search_query("match");
        let search = chat.search.as_mut().unwrap();
        assert_eq!(search.current(), Some(a));
        assert_eq!(search.next(), Some(b));
        // No wraparound at the last result.
        assert_eq!(search.next(), Some(b));
        assert_eq!(search.previous(), Some(a));
        // No wraparound at the first result.
        assert_eq!(search.previous(), Some(a));
    }

    #[test]
    fn lightbox_wraps_modulo_over_image_messages() {
        let mut chat = ChatState::new();
        let me = sender();
        chat.send_message("text", &me, 0);
        let first = chat.attach_file("a.png", "image/png", 1, "u1", &me, 1);
        chat.attach_file("doc.pdf", "application/pdf", 1, "u2", &me, 2);
        let second = chat.attach_file("b.png", "image/png", 1, "u3", &me, 3);

        assert!(chat.open_lightbox(&second));
        let lightbox = chat.lightbox.as_mut().unwrap();
        assert_eq!(lightbox.images.len(), 2);
        assert_eq!(lightbox.current(), Some(second));

        lightbox.next();
        assert_eq!(lightbox.current(), Some(first));
        lightbox.previous();
        assert_eq!(lightbox.current(), Some(second));
    }

    #[test]
    fn timings_load_from_configuration_json() {
        let json = r#"{
            "delivered_after_ms": 500,
            "read_after_ms": 800,
            "typing_show_after_ms": 100,
            "typing_clear_after_ms": 200
        }"#;
        let timings: ChatTimings = serde_json::from_str(json).unwrap();
        assert_eq!(timings.delivered_after_ms, 500);

        let mut chat = ChatState {
            timings,
            ..ChatState::new()
        };
        let id = chat.send_message("hi", &sender(), 0).unwrap();
        chat.advance_to(500);
        assert_eq!(chat.message(&id).unwrap().status, DeliveryStatus::Delivered);
        chat.advance_to(1_300);
        assert_eq!(chat.message(&id).unwrap().status, DeliveryStatus::Read);
    }

    #[test]
    fn lightbox_without_images_refuses_to_open() {
        let mut chat = ChatState::new();
        let id = chat.send_message("no images here", &sender(), 0).unwrap();
        assert!(!chat.open_lightbox(&id));
        assert!(chat.lightbox.is_none());
    }
}
