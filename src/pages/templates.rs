//! Tera templates for the server-rendered pages

use crate::core::error::DashboardError;
use tera::{Context, Tera};

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{% block title %}Invoices{% endblock title %} | Acme Dashboard</title>
</head>
<body>
  <main>
{% block content %}{% endblock content %}
  </main>
</body>
</html>
"#;

const BREADCRUMBS: &str = r#"<nav aria-label="Breadcrumb">
  <ol class="breadcrumbs">
  {%- for crumb in breadcrumbs %}
    <li{% if crumb.active %} aria-current="page"{% endif %}>
      <a href="{{ crumb.href }}">{{ crumb.label }}</a>
    </li>
    {%- if not loop.last %}<span>/</span>{% endif %}
  {%- endfor %}
  </ol>
</nav>
"#;

const EDIT_INVOICE: &str = r#"{% extends "layout.html" %}
{% block title %}Edit Invoice{% endblock title %}
{% block content %}
{% include "breadcrumbs.html" %}
<form action="{{ action }}" method="post">
  <input type="hidden" name="id" value="{{ invoice.id }}">
  <label for="customer">Choose customer</label>
  <select id="customer" name="customerId">
    <option value="" disabled>Select a customer</option>
  {%- for customer in customers %}
    <option value="{{ customer.id }}"{% if customer.id == invoice.customer_id %} selected{% endif %}>{{ customer.name }}</option>
  {%- endfor %}
  </select>
  <label for="amount">Choose an amount</label>
  <input id="amount" name="amount" type="number" step="0.01" value="{{ invoice.amount }}" placeholder="Enter USD amount">
  <fieldset>
    <legend>Set the invoice status</legend>
  {%- for status in statuses %}
    <input id="{{ status }}" name="status" type="radio" value="{{ status }}"{% if status == invoice.status %} checked{% endif %}>
    <label for="{{ status }}">{{ status | capitalize }}</label>
  {%- endfor %}
  </fieldset>
  <a href="{{ cancel_href }}">Cancel</a>
  <button type="submit">Edit Invoice</button>
</form>
{% endblock content %}
"#;

const INVOICE_LIST: &str = r#"{% extends "layout.html" %}
{% block content %}
<h1>Invoices</h1>
<a href="/dashboard/invoices/create">Create Invoice</a>
<table>
  <thead>
    <tr><th>Customer</th><th>Email</th><th>Amount</th><th>Date</th><th>Status</th><th></th></tr>
  </thead>
  <tbody>
  {%- if rows | length == 0 %}
    <tr><td colspan="6">No invoices yet.</td></tr>
  {%- endif %}
  {%- for row in rows %}
    <tr>
      <td>{{ row.name }}</td>
      <td>{{ row.email }}</td>
      <td>{{ row.amount_display }}</td>
      <td>{{ row.date }}</td>
      <td>{{ row.status }}</td>
      <td><a href="/dashboard/invoices/{{ row.id }}/edit">Edit</a></td>
    </tr>
  {%- endfor %}
  </tbody>
</table>
{% endblock content %}
"#;

const NOT_FOUND: &str = r#"{% extends "layout.html" %}
{% block title %}Not Found{% endblock title %}
{% block content %}
<h2>404 Not Found</h2>
<p>Could not find the requested {{ entity }}.</p>
<a href="{{ back_href }}">Go Back</a>
{% endblock content %}
"#;

/// Compiled page templates
#[derive(Debug, Clone)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub const EDIT_INVOICE: &'static str = "invoices/edit.html";
    pub const INVOICE_LIST: &'static str = "invoices/list.html";
    pub const NOT_FOUND: &'static str = "not_found.html";

    pub fn new() -> Result<Self, DashboardError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", LAYOUT),
            ("breadcrumbs.html", BREADCRUMBS),
            (Self::EDIT_INVOICE, EDIT_INVOICE),
            (Self::INVOICE_LIST, INVOICE_LIST),
            (Self::NOT_FOUND, NOT_FOUND),
        ])
        .map_err(|e| DashboardError::Render {
            template: "*".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, DashboardError> {
        self.tera
            .render(template, context)
            .map_err(|e| DashboardError::Render {
                template: template.to_string(),
                message: format!("{:?}", e),
            })
    }
}
