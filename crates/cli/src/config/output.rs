use ordermgr_sdk::{programs::anchor_lang::prelude::Pubkey, serde::StringPubkey};
use prettytable::{
    format::{FormatBuilder, LinePosition, LineSeparator, TableFormat},
    row, Cell, Table,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Output format.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Table.
    #[default]
    Table,
    /// JSON.
    Json,
}

impl OutputFormat {
    /// Display keyed account.
    pub fn display_keyed_account(
        &self,
        pubkey: &Pubkey,
        account: impl Serialize,
    ) -> eyre::Result<String> {
        let keyed_account = KeyedAccount {
            pubkey: (*pubkey).into(),
            account,
        };
        self.display_one(keyed_account)
    }

    /// Display a serializable item.
    pub fn display_one(&self, item: impl Serialize) -> eyre::Result<String> {
        let map = to_map(item)?;
        match self {
            Self::Json => Self::display_json_one(&map),
            Self::Table => Self::display_table_one(&map),
        }
    }

    /// Display a list of serializable items.
    pub fn display_many(
        &self,
        items: impl IntoIterator<Item = impl Serialize>,
    ) -> eyre::Result<String> {
        let items = items
            .into_iter()
            .map(to_map)
            .collect::<eyre::Result<Vec<_>>>()?;
        match self {
            Self::Json => Self::display_json_many(&items),
            Self::Table => Self::display_table_many(&items),
        }
    }

    fn display_json_many(items: &[Map<String, Value>]) -> eyre::Result<String> {
        Ok(serde_json::to_string_pretty(items)?)
    }

    fn display_table_many(items: &[Map<String, Value>]) -> eyre::Result<String> {
        let mut items = items.iter().peekable();
        let Some(first) = items.peek() else {
            return Ok("empty".to_string());
        };
        let mut table = Table::new();
        table.set_format(table_format());
        table.set_titles(first.keys().into());

        for item in items {
            table.add_row(item.values().map(json_value_to_cell).collect());
        }

        Ok(table.to_string())
    }

    fn display_json_one(item: &Map<String, Value>) -> eyre::Result<String> {
        Ok(serde_json::to_string_pretty(item)?)
    }

    fn display_table_one(item: &Map<String, Value>) -> eyre::Result<String> {
        let mut table = Table::new();
        table.set_format(table_format());
        table.set_titles(row!["Key", "Value"]);

        for (k, v) in item {
            table.add_row(row![k, json_value_to_cell(v)]);
        }

        Ok(table.to_string())
    }
}

fn to_map(item: impl Serialize) -> eyre::Result<Map<String, Value>> {
    let Value::Object(map) = serde_json::to_value(item)? else {
        eyre::bail!("internal: only map-like structures are supported");
    };
    Ok(map)
}

#[derive(serde::Serialize, serde::Deserialize)]
struct KeyedAccount<T> {
    pubkey: StringPubkey,
    #[serde(flatten)]
    account: T,
}

fn table_format() -> TableFormat {
    FormatBuilder::new()
        .padding(0, 2)
        .separator(LinePosition::Title, LineSeparator::new('-', '+', '+', '+'))
        .build()
}

fn json_value_to_cell(value: &Value) -> Cell {
    let content = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "".to_string(),
        other => other.to_string(),
    };

    Cell::new(&content)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_keeps_field_order() -> eyre::Result<()> {
        let items = [json!({"tradeId": "1", "status": "Signed"})];
        let out = OutputFormat::Json.display_many(items)?;
        let parsed: Value = serde_json::from_str(&out)?;
        assert_eq!(parsed[0]["tradeId"], "1");
        assert!(out.find("tradeId") < out.find("status"));
        Ok(())
    }

    #[test]
    fn table_has_titles_and_rows() -> eyre::Result<()> {
        let items = [
            json!({"status": "Signed", "tradeId": "1"}),
            json!({"status": "Shipped", "tradeId": "2"}),
        ];
        let out = OutputFormat::Table.display_many(items)?;
        assert!(out.contains("tradeId"));
        assert!(out.contains("Shipped"));
        assert_eq!(OutputFormat::Table.display_many(Vec::<Value>::new())?, "empty");
        Ok(())
    }

    #[test]
    fn scalar_is_rejected() {
        assert!(OutputFormat::Json.display_one(1).is_err());
    }
}
