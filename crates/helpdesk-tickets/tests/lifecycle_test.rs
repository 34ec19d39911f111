//! Integration tests for the ticket lifecycle, against an in-memory
//! database.

use helpdesk_core::error::HelpdeskError;
use helpdesk_core::models::ticket::{Priority, TicketPatch, TicketStatus};
use helpdesk_core::models::user::{CreateUser, Role, User};
use helpdesk_core::repository::UserRepository;
use helpdesk_db::repository::{SurrealTicketRepository, SurrealUserRepository};
use helpdesk_tickets::{Actor, ClaimOutcome, CreateTicketInput, TicketFilter, TicketService};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Service = TicketService<SurrealTicketRepository<Db>, SurrealUserRepository<Db>>;

async fn setup() -> (Service, SurrealUserRepository<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    helpdesk_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let tickets = SurrealTicketRepository::new(db);
    (TicketService::new(tickets, users.clone()), users)
}

async fn register(users: &SurrealUserRepository<Db>, name: &str, role: Role) -> User {
    users
        .create(CreateUser {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$unused$unused".into(),
            role,
        })
        .await
        .unwrap()
}

fn actor(user: &User) -> Actor {
    Actor::new(user.id, user.role)
}

fn vpn_ticket() -> CreateTicketInput {
    CreateTicketInput {
        title: "VPN keeps dropping".into(),
        description: "Connection drops every ten minutes".into(),
        priority: Some("high".into()),
        category: "network".into(),
    }
}

#[tokio::test]
async fn new_tickets_are_open_and_unassigned() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.assigned_to, None);
    assert_eq!(ticket.created_by, alice.id);
    assert_eq!(ticket.priority, Priority::High);
}

#[tokio::test]
async fn priority_is_normalized_and_defaulted() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let me = actor(&alice);

    let shouted = svc
        .create_ticket(
            &me,
            CreateTicketInput {
                priority: Some("URGENT".into()),
                ..vpn_ticket()
            },
        )
        .await
        .unwrap();
    assert_eq!(shouted.priority, Priority::Urgent);

    let unspecified = svc
        .create_ticket(
            &me,
            CreateTicketInput {
                priority: None,
                ..vpn_ticket()
            },
        )
        .await
        .unwrap();
    assert_eq!(unspecified.priority, Priority::Medium);

    let bogus = svc
        .create_ticket(
            &me,
            CreateTicketInput {
                priority: Some("critical".into()),
                ..vpn_ticket()
            },
        )
        .await;
    assert!(matches!(bogus, Err(HelpdeskError::Validation { .. })));
}

#[tokio::test]
async fn create_requires_title_description_category() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let me = actor(&alice);

    for input in [
        CreateTicketInput {
            title: " ".into(),
            ..vpn_ticket()
        },
        CreateTicketInput {
            description: "".into(),
            ..vpn_ticket()
        },
        CreateTicketInput {
            category: "".into(),
            ..vpn_ticket()
        },
    ] {
        let result = svc.create_ticket(&me, input).await;
        assert!(matches!(result, Err(HelpdeskError::Validation { .. })));
    }
}

#[tokio::test]
async fn employees_see_only_their_own_and_assigned_tickets() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let bob = register(&users, "Bob", Role::Employee).await;
    let carol = register(&users, "Carol", Role::Support).await;

    let mine = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();
    let theirs = svc
        .create_ticket(
            &actor(&bob),
            CreateTicketInput {
                title: "Broken keyboard".into(),
                ..vpn_ticket()
            },
        )
        .await
        .unwrap();

    // Assign Bob's ticket to Alice so it shows up in her listing too.
    svc.update_ticket(
        &actor(&carol),
        theirs.id,
        TicketPatch {
            assigned_to: Some(Some(alice.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let third = svc
        .create_ticket(
            &actor(&carol),
            CreateTicketInput {
                title: "Monitor flicker".into(),
                ..vpn_ticket()
            },
        )
        .await
        .unwrap();

    let visible = svc
        .list_tickets(&actor(&alice), &TicketFilter::default())
        .await
        .unwrap();
    let ids: Vec<Uuid> = visible.iter().map(|v| v.id).collect();
    assert!(ids.contains(&mine.id));
    assert!(ids.contains(&theirs.id));
    assert!(!ids.contains(&third.id));

    // Support sees everything.
    let all = svc
        .list_tickets(&actor(&carol), &TicketFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn listing_is_enriched_with_display_names() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let carol = register(&users, "Carol", Role::Support).await;

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    let views = svc
        .list_tickets(&actor(&carol), &TicketFilter::default())
        .await
        .unwrap();
    assert_eq!(views[0].created_by_name, "Alice");
    assert_eq!(views[0].assigned_to_name, "Unassigned");

    svc.self_assign(&actor(&carol), ticket.id).await.unwrap();

    let views = svc
        .list_tickets(&actor(&carol), &TicketFilter::default())
        .await
        .unwrap();
    assert_eq!(views[0].assigned_to_name, "Carol");
}

#[tokio::test]
async fn filters_narrow_the_listing() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let carol = register(&users, "Carol", Role::Support).await;
    let me = actor(&alice);

    svc.create_ticket(&me, vpn_ticket()).await.unwrap();
    let urgent = svc
        .create_ticket(
            &me,
            CreateTicketInput {
                title: "Server room is on fire".into(),
                priority: Some("urgent".into()),
                ..vpn_ticket()
            },
        )
        .await
        .unwrap();
    svc.self_assign(&actor(&carol), urgent.id).await.unwrap();

    let by_priority = svc
        .list_tickets(
            &me,
            &TicketFilter {
                priority: Some("urgent".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_priority.len(), 1);
    assert_eq!(by_priority[0].id, urgent.id);

    let by_status = svc
        .list_tickets(
            &me,
            &TicketFilter {
                status: Some("in progress".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].id, urgent.id);

    // Search matches the assignee's name, case-insensitively.
    let by_search = svc
        .list_tickets(
            &me,
            &TicketFilter {
                search: Some("CAROL".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].id, urgent.id);

    let no_match = svc
        .list_tickets(
            &me,
            &TicketFilter {
                search: Some("mainframe".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(no_match.is_empty());
}

#[tokio::test]
async fn invalid_status_filter_fails_the_request() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;

    let result = svc
        .list_tickets(
            &actor(&alice),
            &TicketFilter {
                status: Some("Open".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(HelpdeskError::Validation { .. })));
}

#[tokio::test]
async fn self_assign_claims_open_ticket() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let carol = register(&users, "Carol", Role::Support).await;

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    let outcome = svc.self_assign(&actor(&carol), ticket.id).await.unwrap();
    assert!(outcome.was_claimed());
    assert_eq!(outcome.ticket().status, TicketStatus::InProgress);
    assert_eq!(outcome.ticket().assigned_to, Some(carol.id));
}

#[tokio::test]
async fn employees_can_claim_open_unassigned_tickets() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let bob = register(&users, "Bob", Role::Employee).await;

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    let outcome = svc.self_assign(&actor(&bob), ticket.id).await.unwrap();
    assert!(outcome.was_claimed());
    assert_eq!(outcome.ticket().status, TicketStatus::InProgress);
    assert_eq!(outcome.ticket().assigned_to, Some(bob.id));

    // The claimed ticket now shows up in Bob's listing.
    let visible = svc
        .list_tickets(&actor(&bob), &TicketFilter::default())
        .await
        .unwrap();
    assert!(visible.iter().any(|v| v.id == ticket.id));
}

#[tokio::test]
async fn second_claim_loses() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let carol = register(&users, "Carol", Role::Support).await;
    let dave = register(&users, "Dave", Role::Support).await;

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    svc.self_assign(&actor(&carol), ticket.id).await.unwrap();
    let second = svc.self_assign(&actor(&dave), ticket.id).await.unwrap();
    assert!(!second.was_claimed());
    assert!(matches!(second, ClaimOutcome::AlreadyTaken(_)));

    // The first assignee is untouched.
    assert_eq!(second.ticket().assigned_to, Some(carol.id));
}

#[tokio::test]
async fn self_assign_missing_ticket_is_not_found() {
    let (svc, users) = setup().await;
    let carol = register(&users, "Carol", Role::Support).await;

    let result = svc.self_assign(&actor(&carol), Uuid::new_v4()).await;
    assert!(matches!(result, Err(HelpdeskError::NotFound { .. })));
}

#[tokio::test]
async fn concurrent_claims_have_exactly_one_winner() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let bob = register(&users, "Bob", Role::Employee).await;
    let carol = register(&users, "Carol", Role::Support).await;

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    // Two employees race for the same open ticket.
    let alice_actor = actor(&alice);
    let bob_actor = actor(&bob);
    let (first, second) = tokio::join!(
        svc.self_assign(&alice_actor, ticket.id),
        svc.self_assign(&bob_actor, ticket.id),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert!(first.was_claimed() ^ second.was_claimed());

    // Exactly one final assignee, and it is the winner.
    let view = svc.get_ticket(&actor(&carol), ticket.id).await.unwrap();
    let winner = if first.was_claimed() { alice.id } else { bob.id };
    assert_eq!(view.assigned_to, Some(winner));
}

#[tokio::test]
async fn update_and_delete_are_support_only() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let me = actor(&alice);

    let ticket = svc.create_ticket(&me, vpn_ticket()).await.unwrap();

    let update = svc
        .update_ticket(
            &me,
            ticket.id,
            TicketPatch {
                status: Some(TicketStatus::Resolved),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        update,
        Err(HelpdeskError::AuthorizationDenied { .. })
    ));

    let delete = svc.delete_ticket(&me, ticket.id).await;
    assert!(matches!(
        delete,
        Err(HelpdeskError::AuthorizationDenied { .. })
    ));

    // Even on their own ticket; the record is untouched.
    let view = svc.get_ticket(&me, ticket.id).await.unwrap();
    assert_eq!(view.status, TicketStatus::Open);
}

#[tokio::test]
async fn support_can_update_and_delete() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let carol = register(&users, "Carol", Role::Support).await;
    let staff = actor(&carol);

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    let updated = svc
        .update_ticket(
            &staff,
            ticket.id,
            TicketPatch {
                status: Some(TicketStatus::Resolved),
                priority: Some(Priority::Low),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TicketStatus::Resolved);
    assert_eq!(updated.priority, Priority::Low);

    svc.delete_ticket(&staff, ticket.id).await.unwrap();

    let gone = svc.get_ticket(&staff, ticket.id).await;
    assert!(matches!(gone, Err(HelpdeskError::NotFound { .. })));
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let carol = register(&users, "Carol", Role::Support).await;

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    let result = svc
        .update_ticket(&actor(&carol), ticket.id, TicketPatch::default())
        .await;
    assert!(matches!(result, Err(HelpdeskError::Validation { .. })));
}

#[tokio::test]
async fn employees_cannot_peek_at_foreign_tickets() {
    let (svc, users) = setup().await;
    let alice = register(&users, "Alice", Role::Employee).await;
    let bob = register(&users, "Bob", Role::Employee).await;

    let ticket = svc.create_ticket(&actor(&alice), vpn_ticket()).await.unwrap();

    let result = svc.get_ticket(&actor(&bob), ticket.id).await;
    assert!(matches!(
        result,
        Err(HelpdeskError::AuthorizationDenied { .. })
    ));
}
