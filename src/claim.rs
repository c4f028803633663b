//! Invite/claim reconciliation.
//!
//! When a signed-in user loads an organisation, a pending invite matching
//! their normalized email is converted into a membership carrying the
//! invite's role, and the invite is marked accepted. The conversion runs in
//! a single transaction and the membership table's unique indexes make a
//! concurrent duplicate claim fail cleanly: the loser observes a unique
//! violation and degrades to a no-op.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::{ApiError, is_unique_violation};
use crate::models::invite::{self, STATUS_ACCEPTED, STATUS_PENDING};
use crate::models::membership;
use crate::repositories::MembershipRepository;

/// What the reconciler did for this load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The user already holds a membership; nothing was written.
    AlreadyMember,
    /// No pending invite matches the user's email; nothing was written.
    NoPendingInvite,
    /// A pending invite was converted into a membership.
    Claimed { role: String },
    /// A concurrent claim won the race; this run wrote nothing.
    LostRace,
}

/// Reconcile a pending invite against the signed-in user, if any.
///
/// Safe to run on every organisation load: once the membership exists the
/// first check short-circuits and no further writes happen.
pub async fn reconcile_invite(
    db: &DatabaseConnection,
    organisation_id: Uuid,
    identity: &Identity,
) -> Result<ClaimOutcome, ApiError> {
    let Some(email) = identity.normalized_email() else {
        return Ok(ClaimOutcome::NoPendingInvite);
    };

    let memberships = MembershipRepository::new(db);
    if memberships
        .find_for_user(organisation_id, &identity.user_id, Some(&email))
        .await?
        .is_some()
    {
        return Ok(ClaimOutcome::AlreadyMember);
    }

    let txn = db.begin().await.map_err(ApiError::from)?;

    let pending = invite::Entity::find()
        .filter(invite::Column::OrganisationId.eq(organisation_id))
        .filter(invite::Column::Email.eq(email.as_str()))
        .filter(invite::Column::Status.eq(STATUS_PENDING))
        .one(&txn)
        .await
        .map_err(ApiError::from)?;

    let Some(pending) = pending else {
        txn.rollback().await.map_err(ApiError::from)?;
        return Ok(ClaimOutcome::NoPendingInvite);
    };

    let role = pending.role.clone();
    let new_membership = membership::ActiveModel {
        id: Set(Uuid::new_v4()),
        organisation_id: Set(organisation_id),
        user_id: Set(Some(identity.user_id.clone())),
        email: Set(email),
        role: Set(role.clone()),
        created_at: Set(chrono::Utc::now().into()),
    };

    match new_membership.insert(&txn).await {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err) => {
            tracing::debug!(
                organisation_id = %organisation_id,
                user_id = %identity.user_id,
                "Concurrent invite claim already created the membership"
            );
            txn.rollback().await.map_err(ApiError::from)?;
            return Ok(ClaimOutcome::LostRace);
        }
        Err(err) => return Err(err.into()),
    }

    let mut accepted = pending.into_active_model();
    accepted.status = Set(STATUS_ACCEPTED.to_string());
    accepted.update(&txn).await.map_err(ApiError::from)?;

    txn.commit().await.map_err(ApiError::from)?;

    tracing::info!(
        organisation_id = %organisation_id,
        user_id = %identity.user_id,
        role = %role,
        "Claimed pending invite into membership"
    );

    Ok(ClaimOutcome::Claimed { role })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        CreateOrganisationRequest, InviteRepository, OrganisationRepository,
    };
    use migration::MigratorTrait;
    use sea_orm::Database;

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn create_organisation(db: &DatabaseConnection) -> Uuid {
        OrganisationRepository::new(db)
            .create(CreateOrganisationRequest {
                name: "Acme".to_string(),
                owner_user_id: "owner_1".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn invitee() -> Identity {
        Identity {
            user_id: "user_2".to_string(),
            email: Some("A@X.com".to_string()),
        }
    }

    #[tokio::test]
    async fn claims_pending_invite_exactly_once() {
        let db = setup_test_db().await;
        let org = create_organisation(&db).await;
        InviteRepository::new(&db)
            .upsert_pending(org, "a@x.com", "admin")
            .await
            .unwrap();

        let outcome = reconcile_invite(&db, org, &invitee()).await.unwrap();
        assert_eq!(
            outcome,
            ClaimOutcome::Claimed {
                role: "admin".to_string()
            }
        );

        let members = MembershipRepository::new(&db)
            .list_for_organisation(org)
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id.as_deref(), Some("user_2"));
        assert_eq!(members[0].email, "a@x.com");
        assert_eq!(members[0].role, "admin");

        let invite = InviteRepository::new(&db)
            .find_by_email(org, "a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(invite.status, STATUS_ACCEPTED);

        // A second load short-circuits on the existing membership.
        let again = reconcile_invite(&db, org, &invitee()).await.unwrap();
        assert_eq!(again, ClaimOutcome::AlreadyMember);
        let members = MembershipRepository::new(&db)
            .list_for_organisation(org)
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn no_invite_means_no_writes() {
        let db = setup_test_db().await;
        let org = create_organisation(&db).await;

        let outcome = reconcile_invite(&db, org, &invitee()).await.unwrap();
        assert_eq!(outcome, ClaimOutcome::NoPendingInvite);

        let members = MembershipRepository::new(&db)
            .list_for_organisation(org)
            .await
            .unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn revoked_invite_is_not_claimable() {
        let db = setup_test_db().await;
        let org = create_organisation(&db).await;
        let invites = InviteRepository::new(&db);
        let invite = invites.upsert_pending(org, "a@x.com", "member").await.unwrap();
        invites.revoke(org, invite.id).await.unwrap();

        let outcome = reconcile_invite(&db, org, &invitee()).await.unwrap();
        assert_eq!(outcome, ClaimOutcome::NoPendingInvite);
    }

    #[tokio::test]
    async fn user_without_email_skips() {
        let db = setup_test_db().await;
        let org = create_organisation(&db).await;
        InviteRepository::new(&db)
            .upsert_pending(org, "a@x.com", "member")
            .await
            .unwrap();

        let identity = Identity {
            user_id: "user_3".to_string(),
            email: None,
        };
        let outcome = reconcile_invite(&db, org, &identity).await.unwrap();
        assert_eq!(outcome, ClaimOutcome::NoPendingInvite);
    }
}
