//! Integration tests for `DieselDomainRepository` against embedded PostgreSQL.
//!
//! Each test provisions a fresh database, seeds two HIST reviewers, three HIST
//! domains and one BIO domain, then drives the listing queries directly.

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pagination::{Page, PageRequest};
use pg_embed::TestDatabase;
use rating_backend::domain::ports::DomainRepository;
use rating_backend::domain::{
    DomainListEntry, DomainListingRequest, DomainSort, SortOrder, SubjectCode, UserId,
};
use rating_backend::outbound::persistence::DieselDomainRepository;
use rstest::{fixture, rstest};

const TEST_DB: &str = "diesel_domain_repository_test";

struct World {
    db: TestDatabase,
    ana: i32,
    ben: i32,
    rome: i32,
    athens: i32,
    carthage: i32,
}

impl World {
    fn rate(&self, domain_id: i32, user_id: i32) {
        self.db
            .execute(&format!(
                "INSERT INTO ratings (domain_id, user_id, relevance, popularity, professionalism) \
                 VALUES ({domain_id}, {user_id}, 5, 5, 5)"
            ))
            .expect("seed rating");
    }

    fn list(
        &self,
        user_id: i32,
        (page, page_size): (u32, u32),
        sort: DomainSort,
        order: SortOrder,
    ) -> Page<DomainListEntry> {
        let repository = DieselDomainRepository::new(self.db.pool.clone());
        let request = DomainListingRequest {
            subject_code: SubjectCode::new("HIST").expect("subject code"),
            user_id: UserId::new(user_id).expect("user id"),
            page: PageRequest::new(page, page_size).expect("page request"),
            sort,
            order,
        };
        self.db
            .runtime
            .block_on(repository.list_page(&request))
            .expect("listing succeeds")
    }

    fn count_rated(&self, user_id: i32) -> u64 {
        let repository = DieselDomainRepository::new(self.db.pool.clone());
        let subject = SubjectCode::new("HIST").expect("subject code");
        let user_id = UserId::new(user_id).expect("user id");
        self.db
            .runtime
            .block_on(repository.count_rated(&subject, &user_id))
            .expect("count succeeds")
    }
}

fn names(page: &Page<DomainListEntry>) -> Vec<&str> {
    page.items()
        .iter()
        .map(|entry| entry.domain.domain())
        .collect()
}

#[fixture]
fn world() -> Option<World> {
    let db = TestDatabase::start(TEST_DB)?;
    let ana = db.seed_user("ana", Some("HIST"));
    let ben = db.seed_user("ben", Some("HIST"));
    let rome = db.seed_domain("rome.example", "HIST");
    let athens = db.seed_domain("athens.example", "HIST");
    let carthage = db.seed_domain("carthage.example", "HIST");
    db.seed_domain("cells.org", "BIO");
    Some(World {
        db,
        ana,
        ben,
        rome,
        athens,
        carthage,
    })
}

#[rstest]
fn listing_joins_only_the_requesting_reviewers_ratings(world: Option<World>) {
    let Some(world) = world else {
        eprintln!("SKIP-TEST-CLUSTER: listing_joins_only_the_requesting_reviewers_ratings skipped");
        return;
    };
    world.rate(world.rome, world.ana);
    world.rate(world.athens, world.ben);

    let page = world.list(world.ana, (1, 10), DomainSort::Domain, SortOrder::Asc);

    assert_eq!(
        names(&page),
        ["athens.example", "carthage.example", "rome.example"]
    );
    let rated: Vec<bool> = page.items().iter().map(DomainListEntry::is_rated).collect();
    assert_eq!(rated, [false, false, true]);
    let rome = page.items().get(2).and_then(|entry| entry.rating.as_ref());
    assert_eq!(
        rome.map(|rating| rating.user_id().get()),
        Some(world.ana)
    );
    assert_eq!(page.meta().total(), 3);
}

#[rstest]
#[case(SortOrder::Asc, ["athens.example", "carthage.example", "rome.example"])]
#[case(SortOrder::Desc, ["carthage.example", "rome.example", "athens.example"])]
fn status_sort_groups_by_rated_then_name(
    world: Option<World>,
    #[case] order: SortOrder,
    #[case] expected: [&str; 3],
) {
    let Some(world) = world else {
        eprintln!("SKIP-TEST-CLUSTER: status_sort_groups_by_rated_then_name skipped");
        return;
    };
    world.rate(world.carthage, world.ana);
    world.rate(world.rome, world.ana);
    world.rate(world.athens, world.ben);

    let page = world.list(world.ana, (1, 10), DomainSort::Status, order);

    assert_eq!(names(&page), expected);
}

#[rstest]
fn name_sort_stays_ascending_when_descending_is_requested(world: Option<World>) {
    let Some(world) = world else {
        eprintln!("SKIP-TEST-CLUSTER: name_sort_stays_ascending_when_descending_is_requested skipped");
        return;
    };

    let page = world.list(world.ben, (1, 10), DomainSort::Domain, SortOrder::Desc);

    assert_eq!(
        names(&page),
        ["athens.example", "carthage.example", "rome.example"]
    );
}

#[rstest]
#[case((1, 2), 2)]
#[case((2, 2), 1)]
#[case((3, 2), 0)]
#[case((9, 50), 0)]
fn pages_apply_limit_and_offset(
    world: Option<World>,
    #[case] request: (u32, u32),
    #[case] expected_len: usize,
) {
    let Some(world) = world else {
        eprintln!("SKIP-TEST-CLUSTER: pages_apply_limit_and_offset skipped");
        return;
    };

    let page = world.list(world.ana, request, DomainSort::Domain, SortOrder::Asc);

    assert_eq!(page.items().len(), expected_len);
    assert_eq!(page.meta().total(), 3);
    assert_eq!(page.meta().total_pages(), 3_u64.div_ceil(u64::from(request.1)));
}

#[rstest]
fn rated_count_is_distinct_and_scoped_to_subject_and_reviewer(world: Option<World>) {
    let Some(world) = world else {
        eprintln!("SKIP-TEST-CLUSTER: rated_count_is_distinct_and_scoped_to_subject_and_reviewer skipped");
        return;
    };
    world.rate(world.rome, world.ana);
    world.rate(world.athens, world.ana);
    world.rate(world.athens, world.ben);
    world.rate(world.carthage, world.ben);
    let bio_id = world.db.scalar("SELECT id::bigint FROM domains WHERE subject_code = 'BIO'");
    world.rate(i32::try_from(bio_id).expect("small id"), world.ana);

    assert_eq!(world.count_rated(world.ana), 2);
    assert_eq!(world.count_rated(world.ben), 2);
}
