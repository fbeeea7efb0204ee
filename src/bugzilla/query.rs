// Bugzilla advanced-search terms (product plus fN/oN/vN triples).

use crate::dates::{normalize, DateInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  GreaterThanEq,
  LessThanEq,
  LessThan,
}

impl Operator {
  pub fn as_str(self) -> &'static str {
    match self {
      Operator::GreaterThanEq => "greaterthaneq",
      Operator::LessThanEq => "lessthaneq",
      Operator::LessThan => "lessthan",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
  pub field: &'static str,
  pub op: Operator,
  pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugQuery {
  pub product: String,
  pub conditions: Vec<Condition>,
}

impl BugQuery {
  /// Bugs filed in `[from, to]`; Bugzilla treats both creation bounds as inclusive here.
  pub fn created(product: &str, from: impl Into<DateInput>, to: impl Into<DateInput>) -> Self {
    BugQuery {
      product: product.to_string(),
      conditions: vec![
        Condition { field: "creation_ts", op: Operator::GreaterThanEq, value: normalize(from) },
        Condition { field: "creation_ts", op: Operator::LessThanEq, value: normalize(to) },
      ],
    }
  }

  /// Bugs whose last resolution falls in `[from, to)`.
  pub fn resolved(product: &str, from: impl Into<DateInput>, to: impl Into<DateInput>) -> Self {
    BugQuery {
      product: product.to_string(),
      conditions: vec![
        Condition { field: "cf_last_resolved", op: Operator::GreaterThanEq, value: normalize(from) },
        Condition { field: "cf_last_resolved", op: Operator::LessThan, value: normalize(to) },
      ],
    }
  }

  pub fn is_resolution_query(&self) -> bool {
    self.conditions.iter().any(|c| c.field == "cf_last_resolved")
  }

  /// Flatten into REST query parameters, numbering conditions from 1.
  pub fn to_params(&self) -> Vec<(String, String)> {
    let mut out = vec![("product".to_string(), self.product.clone())];

    for (i, cond) in self.conditions.iter().enumerate() {
      let n = i + 1;
      out.push((format!("f{}", n), cond.field.to_string()));
      out.push((format!("o{}", n), cond.op.as_str().to_string()));
      out.push((format!("v{}", n), cond.value.clone()));
    }

    out
  }
}
