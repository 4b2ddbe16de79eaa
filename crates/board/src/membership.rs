//! Card-membership port.
//!
//! [`CardMembership`] is the only outbound capability the receiver needs.
//! The `trello` crate implements it against the REST API; tests substitute
//! a recording double.

use async_trait::async_trait;

use crate::{CardId, MemberId, MembershipError};

/// Adds and removes members on cards.
#[async_trait]
pub trait CardMembership: Send + Sync {
    /// Adds `member` to the member list of `card`.
    async fn add_member_to_card(
        &self,
        card: &CardId,
        member: &MemberId,
    ) -> Result<(), MembershipError>;

    /// Removes `member` from the member list of `card`.
    async fn remove_member_from_card(
        &self,
        card: &CardId,
        member: &MemberId,
    ) -> Result<(), MembershipError>;
}

/// One membership update decided by an action handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipChange {
    /// Assign `member` to `card`.
    Add {
        /// Target card.
        card: CardId,
        /// Member to assign.
        member: MemberId,
    },
    /// Unassign `member` from `card`.
    Remove {
        /// Target card.
        card: CardId,
        /// Member to unassign.
        member: MemberId,
    },
}

impl MembershipChange {
    /// The card this change targets.
    pub fn card(&self) -> &CardId {
        match self {
            Self::Add { card, .. } | Self::Remove { card, .. } => card,
        }
    }

    /// The member this change adds or removes.
    pub fn member(&self) -> &MemberId {
        match self {
            Self::Add { member, .. } | Self::Remove { member, .. } => member,
        }
    }

    /// Issues exactly one call on `membership` for this change.
    ///
    /// # Errors
    ///
    /// Whatever the adapter returns; this method adds no handling of its own.
    pub async fn apply(&self, membership: &dyn CardMembership) -> Result<(), MembershipError> {
        match self {
            Self::Add { card, member } => membership.add_member_to_card(card, member).await,
            Self::Remove { card, member } => membership.remove_member_from_card(card, member).await,
        }
    }
}

impl std::fmt::Display for MembershipChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add { card, member } => write!(f, "add member '{member}' to card '{card}'"),
            Self::Remove { card, member } => {
                write!(f, "remove member '{member}' from card '{card}'")
            },
        }
    }
}
