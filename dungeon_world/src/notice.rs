//! Notice delivery - short feedback messages shown to a player.

use serde::{Deserialize, Serialize};

use crate::entities::EntityId;

/// Where a notice is displayed on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NoticeType {
    Top,
    TopTwoLines,
    #[default]
    MiddleSystem,
    Middle,
    MiddleLower,
    Left,
}

/// A delivered notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub actor: EntityId,
    pub kind: NoticeType,
    pub text: String,
}

/// Fire-and-forget notice delivery.
///
/// Implementations must not block or fail; the network layer drains whatever
/// is queued here.
pub trait NoticeSink {
    fn notice(&mut self, actor: EntityId, kind: NoticeType, text: &str);
}

/// Queue of notices waiting to be sent.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Notices addressed to one actor.
    pub fn for_actor(&self, actor: EntityId) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| n.actor == actor)
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Take all queued notices.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl NoticeSink for NoticeLog {
    fn notice(&mut self, actor: EntityId, kind: NoticeType, text: &str) {
        self.notices.push(Notice {
            actor,
            kind,
            text: text.to_owned(),
        });
    }
}
