//! Tests for the filter, sort and paginate stages.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::validation::validate_user;

fn person(id: u64, first: &str, last: &str, age: u32) -> User {
    validate_user(&json!({
        "id": id,
        "firstName": first,
        "lastName": last,
        "age": age,
        "gender": "female",
        "email": format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
    }))
    .expect("valid user")
}

fn roster() -> Vec<User> {
    vec![
        person(1, "Emily", "Johnson", 28),
        person(2, "Michael", "Williams", 35),
        person(3, "Sophia", "Brown", 42),
        person(4, "james", "Davis", 28),
        person(5, "Emma", "Miller", 30),
    ]
}

fn ids(users: &[&User]) -> Vec<u64> {
    users.iter().map(|user| user.id().get()).collect()
}

fn page(number: usize) -> PageNumber {
    PageNumber::new(number).expect("non-zero page")
}

#[rstest]
#[case::none("none", SortOption::None)]
#[case::name_asc("name-asc", SortOption::NameAsc)]
#[case::name_desc("name-desc", SortOption::NameDesc)]
#[case::age_asc("age-asc", SortOption::AgeAsc)]
#[case::age_desc("age-desc", SortOption::AgeDesc)]
fn sort_options_round_trip_their_literals(#[case] raw: &str, #[case] expected: SortOption) {
    let parsed: SortOption = raw.parse().expect("known option");
    assert_eq!(parsed, expected);
    assert_eq!(parsed.to_string(), raw);
}

#[rstest]
#[case::upper("NAME-ASC")]
#[case::spaced("name asc")]
#[case::empty("")]
fn rejects_unknown_sort_options(#[case] raw: &str) {
    assert!(raw.parse::<SortOption>().is_err());
}

#[rstest]
#[case::empty("", vec![1, 2, 3, 4, 5])]
#[case::whitespace("   ", vec![1, 2, 3, 4, 5])]
#[case::first_name_any_case("EMI", vec![1])]
#[case::last_name("brown", vec![3])]
#[case::email_domain("example.com", vec![1, 2, 3, 4, 5])]
#[case::email_local_part("james.davis@", vec![4])]
#[case::full_name_across_fields("ily john", vec![1])]
#[case::shared_prefix("em", vec![1, 5])]
#[case::no_match("zelda", vec![])]
fn filters_on_names_and_email(#[case] query: &str, #[case] expected: Vec<u64>) {
    let users = roster();

    let kept = filter_users(&users, &SearchQuery::new(query));

    assert_eq!(ids(&kept), expected);
}

#[test]
fn filtering_is_idempotent() {
    let users = roster();
    let query = SearchQuery::new("em");

    let once = filter_users(&users, &query);
    let twice = filter_users(once.iter().copied(), &query);

    assert_eq!(ids(&once), ids(&twice));
}

#[rstest]
#[case::none(SortOption::None, vec![1, 2, 3, 4, 5])]
#[case::name_asc(SortOption::NameAsc, vec![1, 5, 4, 2, 3])]
#[case::name_desc(SortOption::NameDesc, vec![3, 2, 4, 5, 1])]
#[case::age_asc(SortOption::AgeAsc, vec![1, 4, 5, 2, 3])]
#[case::age_desc(SortOption::AgeDesc, vec![3, 2, 5, 1, 4])]
fn sorts_by_option(#[case] option: SortOption, #[case] expected: Vec<u64>) {
    let users = roster();
    let mut visible: Vec<&User> = users.iter().collect();

    sort_users(&mut visible, option);

    assert_eq!(ids(&visible), expected);
}

#[test]
fn name_descending_reverses_ascending_for_distinct_names() {
    let users = roster();
    let mut ascending: Vec<&User> = users.iter().collect();
    let mut descending = ascending.clone();

    sort_users(&mut ascending, SortOption::NameAsc);
    sort_users(&mut descending, SortOption::NameDesc);
    descending.reverse();

    assert_eq!(ids(&ascending), ids(&descending));
}

#[test]
fn equal_names_keep_filtered_order_in_both_directions() {
    let users = vec![
        person(7, "Alex", "Kim", 20),
        person(3, "Alex", "Kim", 40),
        person(9, "Beth", "Ng", 30),
    ];
    let mut ascending: Vec<&User> = users.iter().collect();
    let mut descending = ascending.clone();

    sort_users(&mut ascending, SortOption::NameAsc);
    sort_users(&mut descending, SortOption::NameDesc);

    assert_eq!(ids(&ascending), [7, 3, 9]);
    assert_eq!(ids(&descending), [9, 7, 3]);
}

#[test]
fn equal_ages_keep_filtered_order() {
    let users = roster();
    let mut descending: Vec<&User> = users.iter().collect();

    sort_users(&mut descending, SortOption::AgeDesc);

    let twenty_eights: Vec<u64> = descending
        .iter()
        .filter(|user| user.age() == 28)
        .map(|user| user.id().get())
        .collect();
    assert_eq!(twenty_eights, [1, 4]);
}

#[rstest]
#[case::case_insensitive("adam", "Bella", Ordering::Less)]
#[case::case_only_difference("Zoe", "zoe", Ordering::Less)]
#[case::equal("Ann Lee", "Ann Lee", Ordering::Equal)]
#[case::prefix("Ann", "Anna", Ordering::Less)]
#[case::accent_before_later_letter("Élodie", "Zoe", Ordering::Less)]
#[case::accent_ignored_for_base_letters("Élodie", "Eve", Ordering::Less)]
#[case::accent_breaks_ties("Elodie", "Élodie", Ordering::Less)]
#[case::precomposed_matches_decomposed("\u{e9}mile", "e\u{301}mile", Ordering::Greater)]
fn collates_names(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
    assert_eq!(compare_names(a, b), expected);
}

#[test]
fn accented_names_sort_among_their_base_letters() {
    let users = [
        person(1, "Zoe", "Adams", 30),
        person(2, "Élodie", "Martin", 30),
        person(3, "Eve", "Brown", 30),
    ];
    let mut ascending: Vec<&User> = users.iter().collect();
    let mut descending = ascending.clone();

    sort_users(&mut ascending, SortOption::NameAsc);
    sort_users(&mut descending, SortOption::NameDesc);

    assert_eq!(ids(&ascending), [2, 3, 1]);
    assert_eq!(ids(&descending), [1, 3, 2]);
}

fn numbered(count: u64) -> Vec<User> {
    (1..=count)
        .map(|id| person(id, "Member", &format!("N{id:02}"), 30))
        .collect()
}

#[rstest]
#[case::first(1, 10, 1)]
#[case::second(2, 10, 11)]
#[case::third(3, 5, 21)]
fn paginates_twenty_five_users(
    #[case] number: usize,
    #[case] expected_len: usize,
    #[case] first_id: u64,
) {
    let users = numbered(25);
    let mut state = ListingState::default();
    state.set_page(page(number));

    let derived = state.derive(&users);

    assert_eq!(derived.items().len(), expected_len);
    assert_eq!(derived.items().first().map(|u| u.id().get()), Some(first_id));
    assert_eq!(derived.total_pages(), 3);
}

#[test]
fn page_beyond_range_resets_to_first() {
    let users = numbered(25);
    let mut state = ListingState::default();
    state.set_page(page(4));

    let derived = state.derive(&users);

    assert_eq!(state.page(), PageNumber::FIRST);
    assert_eq!(derived.number(), PageNumber::FIRST);
    assert_eq!(derived.items().len(), 10);
}

#[test]
fn empty_result_has_zero_pages() {
    let users = roster();
    let mut state = ListingState::default();
    state.set_query("nobody");

    let derived = state.derive(&users);

    assert_eq!(derived.total_pages(), 0);
    assert!(derived.items().is_empty());
}

#[test]
fn changing_query_resets_page() {
    let mut state = ListingState::default();
    state.set_page(page(3));

    state.set_query("a");

    assert_eq!(state.page(), PageNumber::FIRST);
    assert_eq!(state.query().as_str(), "a");
}

#[test]
fn changing_sort_resets_page() {
    let mut state = ListingState::default();
    state.set_page(page(2));

    state.set_sort(SortOption::AgeDesc);

    assert_eq!(state.page(), PageNumber::FIRST);
    assert_eq!(state.sort(), SortOption::AgeDesc);
}

#[test]
fn shrinking_filter_total_resets_page() {
    let users = numbered(25);
    let mut state = ListingState::default();
    state.set_page(page(3));
    assert_eq!(state.derive(&users).number(), page(3));

    let shrunk: Vec<User> = users.into_iter().take(12).collect();
    let derived = state.derive(&shrunk);

    assert_eq!(derived.number(), PageNumber::FIRST);
    assert_eq!(derived.total_pages(), 2);
}

#[test]
fn derive_filters_then_sorts_then_paginates() {
    let users = roster();
    let mut state = ListingState::default();
    state.set_query("em");
    state.set_sort(SortOption::AgeDesc);

    let derived = state.derive(&users);

    assert_eq!(ids(derived.items()), [5, 1]);
    assert_eq!(derived.total_items(), 2);
}
