//! Type definitions for the application state.
//!
//! Contains enums used for tracking UI state:
//! - [`Tab`] - Which workbench tab is displayed
//! - [`Field`] - Which input has focus

/// Represents which tab is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Rest,
    Graphql,
    WebSocket,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Rest, Tab::Graphql, Tab::WebSocket];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Rest => "REST",
            Tab::Graphql => "GraphQL",
            Tab::WebSocket => "WebSocket",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Rest => 0,
            Tab::Graphql => 1,
            Tab::WebSocket => 2,
        }
    }

    /// Focusable fields of this tab, in Tab-key order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Tab::Rest => &[
                Field::Method,
                Field::RestUrl,
                Field::RestHeaders,
                Field::RestBody,
            ],
            Tab::Graphql => &[
                Field::GraphqlUrl,
                Field::GraphqlHeaders,
                Field::GraphqlQuery,
                Field::GraphqlVariables,
            ],
            Tab::WebSocket => &[Field::WsUrl, Field::WsHeaders, Field::WsMessage],
        }
    }
}

/// Represents which input has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// HTTP verb selector; not a text field
    Method,
    RestUrl,
    RestHeaders,
    RestBody,
    GraphqlUrl,
    GraphqlHeaders,
    GraphqlQuery,
    GraphqlVariables,
    WsUrl,
    WsHeaders,
    WsMessage,
}

impl Field {
    pub fn title(self) -> &'static str {
        match self {
            Field::Method => "Method",
            Field::RestUrl | Field::GraphqlUrl => "URL",
            Field::RestHeaders | Field::GraphqlHeaders | Field::WsHeaders => "Headers",
            Field::RestBody => "Body",
            Field::GraphqlQuery => "Query",
            Field::GraphqlVariables => "Variables (JSON)",
            Field::WsUrl => "WebSocket URL",
            Field::WsMessage => "Message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tab_has_fields() {
        for tab in Tab::ALL {
            assert!(!tab.fields().is_empty());
            assert_eq!(Tab::ALL[tab.index()], tab);
        }
    }

    #[test]
    fn test_method_selector_leads_rest_tab() {
        assert_eq!(Tab::Rest.fields()[0], Field::Method);
    }
}
