//! Plain-text rendering of listings and user details.

use std::io::{self, Write};

use pagination::{Page, PageNumber};

use crate::domain::{Favorites, ListingState, SortOption, Theme, User};

const MISSING: &str = "—";
const FAVORITE_MARKER: &str = "★";

/// Write one listing page followed by the `page X of Y` footer.
///
/// When `requested` differs from the page shown, the footer says so.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_listing(
    out: &mut impl Write,
    page: &Page<&User>,
    requested: PageNumber,
    state: &ListingState,
    favorites: &Favorites,
) -> io::Result<()> {
    if !state.query().is_empty() || state.sort() != SortOption::None {
        writeln!(
            out,
            "search: {:?}  sort: {}",
            state.query().as_str(),
            state.sort()
        )?;
    }
    let note = if page.number() == requested {
        String::new()
    } else {
        format!("; page {} is out of range", requested.get())
    };
    if page.items().is_empty() {
        return writeln!(out, "No users found{note}");
    }
    for user in page.items() {
        let marker = if favorites.contains(user.id()) {
            FAVORITE_MARKER
        } else {
            " "
        };
        writeln!(
            out,
            "{marker} {id:>4}  {name:<28} {age:>3}  {email}",
            id = user.id(),
            name = user.full_name(),
            age = user.age(),
            email = user.email(),
        )?;
    }
    writeln!(
        out,
        "page {} of {} ({} users){note}",
        page.number().get(),
        page.total_pages(),
        page.total_items()
    )
}

/// Write the detail sections for `user`.
///
/// The company and address sections are omitted when the user has none.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_user_detail(out: &mut impl Write, user: &User, is_favorite: bool) -> io::Result<()> {
    let details = user.details();
    let marker = if is_favorite {
        format!(" {FAVORITE_MARKER}")
    } else {
        String::new()
    };
    writeln!(out, "{} (#{}){marker}", user.full_name(), user.id())?;
    writeln!(out, "{}", details.role.as_deref().unwrap_or("User"))?;

    section(
        out,
        "Personal",
        &[
            ("Email", Some(user.email().to_owned())),
            ("Age", Some(user.age().to_string())),
            ("Birth date", details.birth_date.clone()),
            ("Gender", Some(user.gender().to_owned())),
            ("Phone", details.phone.clone()),
            ("Blood group", details.blood_group.clone()),
        ],
    )?;
    section(
        out,
        "Physical",
        &[
            ("Height", details.height.map(|height| format!("{height} cm"))),
            ("Weight", details.weight.map(|weight| format!("{weight} kg"))),
            ("Eye colour", details.eye_color.clone()),
            (
                "Hair",
                details
                    .hair
                    .as_ref()
                    .map(|hair| format!("{}, {}", hair.color, hair.kind)),
            ),
        ],
    )?;
    if let Some(company) = &details.company {
        section(
            out,
            "Company",
            &[
                ("Name", company.name.clone()),
                ("Title", company.title.clone()),
                ("Department", company.department.clone()),
            ],
        )?;
    }
    if let Some(address) = &details.address {
        section(
            out,
            "Address",
            &[
                ("Address", Some(address.address.clone())),
                ("City", Some(address.city.clone())),
                ("State", address.state.clone()),
                ("Postal code", address.postal_code.clone()),
            ],
        )?;
    }
    section(
        out,
        "Other",
        &[
            ("University", details.university.clone()),
            ("IP", details.ip.clone()),
            ("MAC address", details.mac_address.clone()),
        ],
    )
}

/// Write favourite ids, one per line.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_favorites(out: &mut impl Write, favorites: &Favorites) -> io::Result<()> {
    if favorites.is_empty() {
        return writeln!(out, "No favourites yet");
    }
    for id in favorites.iter() {
        writeln!(out, "{FAVORITE_MARKER} {id}")?;
    }
    Ok(())
}

/// Write the current theme.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_theme(out: &mut impl Write, theme: Theme) -> io::Result<()> {
    writeln!(out, "theme: {theme}")
}

fn section(out: &mut impl Write, title: &str, rows: &[(&str, Option<String>)]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    for (label, value) in rows {
        writeln!(out, "  {label:<14}{}", value.as_deref().unwrap_or(MISSING))?;
    }
    Ok(())
}
