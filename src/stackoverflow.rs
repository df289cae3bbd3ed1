//! The reputation fragment, taken from the Stack Exchange API.

use crate::client::Client;
use crate::config::Config;
use crate::fetch::{Error, Result};
use crate::fragment::Fragment;
use serde::Deserialize;

fn user_url(user_id: u64) -> String {
    format!(
        "https://api.stackexchange.com/2.2/users/{}?site=stackoverflow",
        user_id
    )
}

#[derive(Deserialize)]
struct UserResponse {
    items: Vec<User>,
}

#[derive(Deserialize)]
struct User {
    reputation: i64,
    reputation_change_month: i64,
}

pub fn fragment(client: &Client, config: &Config) -> Result<Fragment> {
    let text = client
        .get(&user_url(config.stackoverflow_user_id))
        .send()?
        .error_for_status()?
        .text()?;
    let response: UserResponse = serde_json::from_str(&text)?;
    let user = response.items.first().ok_or(Error::MissingField("items"))?;
    Ok(Fragment::Html(render(user)))
}

fn render(user: &User) -> String {
    format!(
        r#"<p>
<span class="latest">Reputation</span>
{reputation} internet points<br />
+{change} this month
</p>
"#,
        reputation = user.reputation,
        change = user.reputation_change_month,
    )
}
