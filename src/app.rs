//! The demo application: its views and route table.
//!
//! | Path           | View        | Guards                         |
//! |----------------|-------------|--------------------------------|
//! | `/home`        | `home`      |                                |
//! | `/about`       | `about`     |                                |
//! | `/dashboard`   | `dashboard` | entry: "Are you logged in?"    |
//! | `/product/:id` | `product`   |                                |
//! | `/form`        | `form`      | exit: unsaved changes prompt   |
//! | (empty)        |             | redirects to `/home`           |
//!
//! ```
//! use guard_navigator::app::{self, ProductView};
//! use guard_navigator::{AlwaysConfirm, Router};
//!
//! let mut router = Router::new(app::routes().unwrap(), AlwaysConfirm);
//! router.navigate("/product/42");
//!
//! let product = router.view_state::<ProductView>().unwrap();
//! assert_eq!(product.product_id(), Some("42"));
//! ```

use crate::error::NavigationError;
use crate::guards::{ConfirmGuard, UnsavedChangesGuard};
use crate::lifecycle::ViewState;
use crate::route::Route;
use crate::table::RouteTable;
use crate::{info_log, NavigationRequest};

/// View identifier of the home page.
pub const HOME: &str = "home";
/// View identifier of the about page.
pub const ABOUT: &str = "about";
/// View identifier of the guarded dashboard.
pub const DASHBOARD: &str = "dashboard";
/// View identifier of the product page.
pub const PRODUCT: &str = "product";
/// View identifier of the form page.
pub const FORM: &str = "form";

/// Build the demo route table.
pub fn routes() -> Result<RouteTable, NavigationError> {
    RouteTable::builder()
        .route(Route::new("/home", HOME))
        .route(Route::new("/about", ABOUT))
        .route(Route::new("/dashboard", DASHBOARD).entry_guard(ConfirmGuard::logged_in()))
        .route(Route::with_state("/product/:id", PRODUCT, ProductView::default))
        .route(
            Route::with_state("/form", FORM, FormView::new)
                .exit_guard(UnsavedChangesGuard::new()),
        )
        .route(Route::redirect("", "/home"))
        .build()
}

/// Product page: shows the `id` it was opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductView {
    product_id: Option<String>,
}

impl ProductView {
    /// The product id from the path, `None` if the route carried none.
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }
}

impl ViewState for ProductView {
    fn on_activate(&mut self, request: &NavigationRequest) {
        self.product_id = request.params.get("id").map(str::to_string);
        info_log!("Product ID: {:?}", self.product_id);
    }
}

/// Form page. Starts out dirty, the way a freshly opened editor would
/// before anything is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    unsaved_changes: bool,
}

impl FormView {
    /// A form with unsaved changes.
    pub fn new() -> Self {
        Self {
            unsaved_changes: true,
        }
    }

    /// Record user input (or its removal).
    pub fn set_unsaved_changes(&mut self, unsaved: bool) {
        self.unsaved_changes = unsaved;
    }

    /// Mark everything saved.
    pub fn save(&mut self) {
        self.unsaved_changes = false;
    }
}

impl Default for FormView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState for FormView {
    fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }
}
