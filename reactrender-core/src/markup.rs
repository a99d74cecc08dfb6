//! Emitted markup formats.
//!
//! | Fragment         | Shape                                                                 |
//! |------------------|-----------------------------------------------------------------------|
//! | Client bootstrap | `<script type="application/json" class="js-react-on-rails-component" data-component-name=".." data-dom-id="..">{props}</script>` |
//! | Store            | `<script type="application/json" data-js-react-on-rails-store="..">{props}</script>` |
//! | Context          | `<script type="application/json" id="js-react-on-rails-context">{context}</script>` |
//! | Container        | `<div id="{dom_id}">...</div>`                                        |

pub const BOOTSTRAP_CLASS: &str = "js-react-on-rails-component";
pub const STORE_MARKER_ATTR: &str = "data-js-react-on-rails-store";
pub const CONTEXT_SCRIPT_ID: &str = "js-react-on-rails-context";

pub fn bootstrap_tag(component_name: &str, dom_id: &str, props_json: &str) -> String {
    format!(
        r#"<script type="application/json" class="{BOOTSTRAP_CLASS}" data-component-name="{component_name}" data-dom-id="{dom_id}">{props_json}</script>"#
    )
}

pub fn store_tag(store_name: &str, props_json: &str) -> String {
    format!(
        r#"<script type="application/json" {STORE_MARKER_ATTR}="{store_name}">{props_json}</script>"#
    )
}

pub fn context_tag(context_json: &str) -> String {
    format!(r#"<script type="application/json" id="{CONTEXT_SCRIPT_ID}">{context_json}</script>"#)
}

pub fn container_open(dom_id: &str) -> String {
    format!(r#"<div id="{dom_id}">"#)
}

pub const CONTAINER_CLOSE: &str = "</div>";
