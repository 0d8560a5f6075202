//! The sample session: two addresses, three users and the queries run over
//! them.

use cobalt_engine::accounts::{Database, User};
use cobalt_engine::persistence::{Direction, StoreResult};
use serde::Serialize;

use crate::cli::messages::{query_header, row_line, rows_affected, system_message};

pub fn run_demo(json: bool, order: Direction) -> StoreResult<()> {
    let db = Database::new()?;

    let berlin = db.create_address("Unter den Linden 1", "berlin")?;
    let brandenburg = db.create_address("Am Markt 3", "brandenburg")?;
    db.create_user("a", berlin.id)?;
    db.create_user("c", berlin.id)?;
    db.create_user("b", brandenburg.id)?;

    show(
        "users living in berlin",
        &db.get_users().from_district("berlin").fetch()?,
        json,
    );
    show(
        &format!("users ordered by name ({})", order),
        &db.get_users().ordered_by_name(order).fetch()?,
        json,
    );
    show(
        "addresses in brandenburg",
        &db.get_addresses().in_district("brandenburg").fetch()?,
        json,
    );

    let n_logins = db.get_users().increase_login_count()?;
    println!();
    println!("{}", rows_affected("increased the login count of", n_logins, "users"));

    let n_deleted = db.get_users().with_name("c").delete()?;
    println!("{}", rows_affected("deleted", n_deleted, "users named c"));

    let remaining: Vec<User> = db.get_users().fetch()?;
    show("remaining users", &remaining, json);

    db.log_sizes()
}

fn show<T: Serialize + std::fmt::Display>(title: &str, rows: &[T], json: bool) {
    println!();
    println!("{}", query_header(title, rows.len()));

    if json {
        match serde_json::to_string_pretty(rows) {
            Ok(text) => println!("{}", text),
            Err(error) => println!("{}", system_message("error", error.to_string())),
        }
    } else {
        for row in rows {
            println!("{}", row_line(row));
        }
    }
}
