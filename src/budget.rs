//! The budgeting-software fetchers: the top-restaurants fragment and the
//! monthly spending CSV export, both backed by the YNAB API.
//!
//! Transaction amounts are milliunits (thousandths of a currency unit).
//! The CSV export keeps raw milliunit sums; only the restaurants fragment
//! divides for display.

use crate::client::Client;
use crate::config::{BudgetConfig, Config};
use crate::fetch::{Error, Result};
use crate::fragment::Fragment;
use chrono::{Datelike, Local, NaiveDate};
use log::info;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

const BASE_URL: &str = "https://api.youneedabudget.com/v1";

fn categories_url(budget_id: &str) -> String {
    format!("{}/budgets/{}/categories", BASE_URL, budget_id)
}

fn category_transactions_url(budget_id: &str, category_id: &str) -> String {
    format!(
        "{}/budgets/{}/categories/{}/transactions",
        BASE_URL, budget_id, category_id
    )
}

fn transactions_url(budget_id: &str) -> String {
    format!("{}/budgets/{}/transactions", BASE_URL, budget_id)
}

#[derive(Deserialize)]
struct CategoriesResponse {
    data: CategoriesData,
}

#[derive(Deserialize)]
struct CategoriesData {
    category_groups: Vec<CategoryGroup>,
}

#[derive(Deserialize)]
struct CategoryGroup {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct Category {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct TransactionsResponse {
    data: TransactionsData,
}

#[derive(Deserialize)]
struct TransactionsData {
    transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub amount: i64,
    pub payee_name: Option<String>,
    pub category_name: String,
}

/// The YNAB endpoints the fetchers use, with the bearer token attached to
/// every request.
struct Api<'a> {
    client: &'a Client,
    config: &'a BudgetConfig,
}

impl<'a> Api<'a> {
    fn new(client: &'a Client, config: &'a BudgetConfig) -> Api<'a> {
        Api { client, config }
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let text = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .query(query)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn category_groups(&self) -> Result<Vec<CategoryGroup>> {
        let response: CategoriesResponse =
            self.get_json(&categories_url(&self.config.budget_id), &[])?;
        Ok(response.data.category_groups)
    }

    fn category_transactions(&self, category_id: &str, since_date: &str) -> Result<Vec<Transaction>> {
        let response: TransactionsResponse = self.get_json(
            &category_transactions_url(&self.config.budget_id, category_id),
            &[("since_date", since_date)],
        )?;
        Ok(response.data.transactions)
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let response: TransactionsResponse =
            self.get_json(&transactions_url(&self.config.budget_id), &[])?;
        Ok(response.data.transactions)
    }
}

fn find_category_id<'a>(groups: &'a [CategoryGroup], name: &str) -> Result<&'a str> {
    groups
        .iter()
        .flat_map(|group| group.categories.iter())
        .find(|category| category.name == name)
        .map(|category| category.id.as_str())
        .ok_or_else(|| Error::CategoryNotFound(name.to_owned()))
}

/// The first of the current month, one year ago.
fn since_date(today: NaiveDate) -> String {
    format!("{:04}-{:02}-01", today.year() - 1, today.month())
}

// -- restaurants fragment --

struct PayeeStats {
    name: String,
    visits: usize,
    spent_milliunits: i64,
}

/// Groups transactions by payee in first-seen order and ranks payees by
/// visit count, ties broken by first appearance. At most ten payees are
/// returned.
fn top_payees(transactions: &[Transaction]) -> Vec<PayeeStats> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (usize, i64)> = HashMap::new();
    for transaction in transactions {
        let name = transaction.payee_name.clone().unwrap_or_default();
        if !totals.contains_key(&name) {
            order.push(name.clone());
        }
        let entry = totals.entry(name).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += transaction.amount;
    }

    let mut stats: Vec<PayeeStats> = order
        .into_iter()
        .map(|name| {
            let (visits, spent_milliunits) = totals[&name];
            PayeeStats {
                name,
                visits,
                spent_milliunits,
            }
        })
        .collect();
    // Vec::sort_by is stable, so equal counts keep first-seen order.
    stats.sort_by(|a, b| b.visits.cmp(&a.visits));
    stats.truncate(10);
    stats
}

pub fn restaurants_fragment(client: &Client, config: &Config) -> Result<Fragment> {
    let api = Api::new(client, &config.budget);
    let groups = api.category_groups()?;
    let category_ids = config
        .budget
        .category_names
        .iter()
        .map(|name| Ok(find_category_id(&groups, name)?.to_owned()))
        .collect::<Result<Vec<String>>>()?;

    let since = since_date(Local::now().date_naive());
    let mut transactions = Vec::new();
    for category_id in &category_ids {
        transactions.extend(api.category_transactions(category_id, &since)?);
    }

    Ok(Fragment::Html(render_restaurants(
        &top_payees(&transactions),
        &config.city,
    )))
}

fn render_restaurants(payees: &[PayeeStats], city: &str) -> String {
    let mut table_rows = String::new();
    for payee in payees {
        let href = format!(
            "http://google.com/maps/search/{}+{}",
            city,
            payee.name.replace(' ', "+")
        );
        table_rows.push_str(&format!(
            r#"<tr>
<td><a href="{href}">{name}</a></td>
<td>{visits}</td>
<td>${spent:.2}</td>
</tr>
"#,
            href = href,
            name = payee.name,
            visits = payee.visits,
            spent = -(payee.spent_milliunits as f64) / 1000.0,
        ));
    }
    format!(
        r#"<p>
<span class="latest">Top {city} restaurants</span>
<span class="latest">Automatically extracted from budgeting software. Don't judge.</span>
</p>
<div class="table-container">
<table>
<thead>
<th>Name</th>
<th>Visits (past year)</th>
<th>Spend 😱 (past year)</th>
</thead>
<tbody>
{table_rows}
</tbody>
</table>
</div>
"#,
        city = city,
        table_rows = table_rows,
    )
}

// -- CSV export --

/// Identifies one cell of the spending aggregation: a category in a given
/// month. Keys with identical fields are interchangeable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BudgetKey {
    pub category_name: String,
    pub year: i32,
    pub month: u32,
}

/// Sums transaction amounts (in milliunits) by category and month.
pub fn aggregate(transactions: &[Transaction]) -> Result<BTreeMap<BudgetKey, i64>> {
    let mut result: BTreeMap<BudgetKey, i64> = BTreeMap::new();
    for transaction in transactions {
        let date = NaiveDate::parse_from_str(&transaction.date, "%Y-%m-%d")?;
        let key = BudgetKey {
            category_name: transaction.category_name.clone(),
            year: date.year(),
            month: date.month(),
        };
        *result.entry(key).or_insert(0) += transaction.amount;
    }
    Ok(result)
}

/// Renders the aggregation as headerless CSV rows of
/// `category_name, year, month, amount`, amounts in raw milliunits.
pub fn to_csv(aggregated: &BTreeMap<BudgetKey, i64>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        for (key, amount) in aggregated {
            let year = key.year.to_string();
            let month = key.month.to_string();
            let amount = amount.to_string();
            writer.write_record(&[
                key.category_name.as_str(),
                year.as_str(),
                month.as_str(),
                amount.as_str(),
            ])?;
        }
        writer.flush().map_err(Error::Io)?;
    }
    Ok(buf)
}

/// Produces the `budget.csv` artifact, reading transactions from the
/// configured local file if one was given and from the API otherwise.
pub fn csv_export(client: &Client, config: &Config) -> Result<Vec<u8>> {
    let transactions = match &config.budget.transactions_file {
        Some(path) => {
            info!("Reading budget info from file: {}", path.display());
            let contents = std::fs::read_to_string(path)?;
            let response: TransactionsResponse = serde_json::from_str(&contents)?;
            response.data.transactions
        }
        None => {
            info!("Fetching budget info from YNAB");
            Api::new(client, &config.budget).all_transactions()?
        }
    };
    to_csv(&aggregate(&transactions)?)
}

#[cfg(test)]
mod test {
    use super::*;

    const TRANSACTIONS_JSON: &str = include_str!("../testdata/transactions.json");

    fn sample_transactions() -> Result<Vec<Transaction>> {
        let response: TransactionsResponse = serde_json::from_str(TRANSACTIONS_JSON)?;
        Ok(response.data.transactions)
    }

    fn transaction(date: &str, amount: i64, payee: &str, category: &str) -> Transaction {
        Transaction {
            date: date.to_owned(),
            amount,
            payee_name: Some(payee.to_owned()),
            category_name: category.to_owned(),
        }
    }

    fn key(category_name: &str, year: i32, month: u32) -> BudgetKey {
        BudgetKey {
            category_name: category_name.to_owned(),
            year,
            month,
        }
    }

    #[test]
    fn test_aggregate_sample_transactions() -> Result<()> {
        let aggregated = aggregate(&sample_transactions()?)?;
        let mut wanted = BTreeMap::new();
        wanted.insert(key("Online Subscriptions", 2016, 10), -5000);
        wanted.insert(key("Uncategorized", 2016, 10), 0);
        wanted.insert(key("Inflow: Ready to Assign", 2016, 10), 0);
        assert_eq!(aggregated, wanted);
        Ok(())
    }

    #[test]
    fn test_aggregate_merges_like_keys() -> Result<()> {
        let transactions = vec![
            transaction("2020-01-15", -1000, "A", "Eating Out"),
            transaction("2020-01-20", -2500, "B", "Eating Out"),
            transaction("2020-02-01", -4000, "A", "Eating Out"),
            transaction("2020-01-31", -100, "C", "Coffee"),
        ];
        let aggregated = aggregate(&transactions)?;
        assert_eq!(aggregated[&key("Eating Out", 2020, 1)], -3500);
        assert_eq!(aggregated[&key("Eating Out", 2020, 2)], -4000);
        assert_eq!(aggregated[&key("Coffee", 2020, 1)], -100);
        Ok(())
    }

    #[test]
    fn test_aggregate_is_merge_compatible() -> Result<()> {
        // Aggregating a concatenation must equal key-wise addition of the
        // parts' aggregations, whatever the partitioning.
        let a = vec![
            transaction("2020-01-15", -1000, "A", "Eating Out"),
            transaction("2020-02-01", -4000, "A", "Eating Out"),
        ];
        let b = vec![
            transaction("2020-01-20", -2500, "B", "Eating Out"),
            transaction("2020-01-31", -100, "C", "Coffee"),
        ];

        let mut concatenated = a.clone();
        concatenated.extend(b.clone());

        let mut merged = aggregate(&a)?;
        for (key, amount) in aggregate(&b)? {
            *merged.entry(key).or_insert(0) += amount;
        }

        assert_eq!(aggregate(&concatenated)?, merged);
        Ok(())
    }

    #[test]
    fn test_aggregate_rejects_malformed_dates() {
        let transactions = vec![transaction("October 31st", -1000, "A", "Eating Out")];
        assert!(aggregate(&transactions).is_err());
    }

    #[test]
    fn test_to_csv_format() -> Result<()> {
        let aggregated = aggregate(&sample_transactions()?)?;
        let csv = String::from_utf8(to_csv(&aggregated)?).unwrap();
        // No header row; keys in sorted order; raw milliunit amounts.
        assert_eq!(
            csv,
            "Inflow: Ready to Assign,2016,10,0\n\
             Online Subscriptions,2016,10,-5000\n\
             Uncategorized,2016,10,0\n"
        );
        Ok(())
    }

    #[test]
    fn test_to_csv_quotes_commas() -> Result<()> {
        let transactions = vec![transaction("2020-01-15", -1000, "A", "Dining, Drinks")];
        let csv = String::from_utf8(to_csv(&aggregate(&transactions)?)?).unwrap();
        assert_eq!(csv, "\"Dining, Drinks\",2020,1,-1000\n");
        Ok(())
    }

    #[test]
    fn test_top_payees_ranked_by_visits() {
        let transactions = vec![
            transaction("2020-01-01", -1000, "Once", "Eating Out"),
            transaction("2020-01-02", -1000, "Thrice", "Eating Out"),
            transaction("2020-01-03", -2000, "Twice", "Eating Out"),
            transaction("2020-01-04", -3000, "Thrice", "Eating Out"),
            transaction("2020-01-05", -4000, "Twice", "Eating Out"),
            transaction("2020-01-06", -5000, "Thrice", "Eating Out"),
        ];
        let payees = top_payees(&transactions);
        let names: Vec<&str> = payees.iter().map(|payee| payee.name.as_str()).collect();
        assert_eq!(names, vec!["Thrice", "Twice", "Once"]);
        assert_eq!(payees[0].visits, 3);
        assert_eq!(payees[0].spent_milliunits, -9000);
    }

    #[test]
    fn test_top_payees_ties_keep_first_seen_order() {
        let transactions = vec![
            transaction("2020-01-01", -1000, "B", "Eating Out"),
            transaction("2020-01-02", -1000, "A", "Eating Out"),
            transaction("2020-01-03", -1000, "C", "Eating Out"),
        ];
        let payees = top_payees(&transactions);
        let names: Vec<&str> = payees.iter().map(|payee| payee.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_top_payees_caps_at_ten() {
        let mut transactions = Vec::new();
        for i in 0..15 {
            transactions.push(transaction(
                "2020-01-01",
                -1000,
                &format!("Payee {}", i),
                "Eating Out",
            ));
        }
        assert_eq!(top_payees(&transactions).len(), 10);
    }

    #[test]
    fn test_render_restaurants_links_to_map_search() {
        let payees = vec![PayeeStats {
            name: "Good Bar Bad Food".to_owned(),
            visits: 4,
            spent_milliunits: -123456,
        }];
        let html = render_restaurants(&payees, "Seattle");
        assert!(html
            .contains(r#"<a href="http://google.com/maps/search/Seattle+Good+Bar+Bad+Food">"#));
        assert!(html.contains("<td>4</td>"));
        assert!(html.contains("<td>$123.46</td>"));
    }

    #[test]
    fn test_find_category_id() -> Result<()> {
        let groups = vec![
            CategoryGroup {
                categories: vec![Category {
                    id: "aaa".to_owned(),
                    name: "Rent".to_owned(),
                }],
            },
            CategoryGroup {
                categories: vec![Category {
                    id: "bbb".to_owned(),
                    name: "Eating Out".to_owned(),
                }],
            },
        ];
        assert_eq!(find_category_id(&groups, "Eating Out")?, "bbb");
        assert!(matches!(
            find_category_id(&groups, "Gardening"),
            Err(Error::CategoryNotFound(name)) if name == "Gardening"
        ));
        Ok(())
    }

    #[test]
    fn test_since_date() {
        let today = NaiveDate::from_ymd_opt(2021, 3, 14).unwrap();
        assert_eq!(since_date(today), "2020-03-01");
    }
}
