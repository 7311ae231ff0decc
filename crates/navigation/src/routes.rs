//! Application route table: path resolution in front of the guard.

use chrono::{DateTime, Utc};
use pymes_auth::catalog::*;
use pymes_auth::{Requirement, SessionState};

use crate::guard::{GuardOutcome, Redirect, Route, RouteGuard};

/// Result of matching a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Route(&'a Route),
    Redirect(Redirect),
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    /// Where `/` lands.
    home: String,
    /// Where unknown paths land.
    not_found: String,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, home: impl Into<String>, not_found: impl Into<String>) -> Self {
        Self {
            routes,
            home: home.into(),
            not_found: not_found.into(),
        }
    }

    /// The application's pages and what each one requires.
    pub fn application() -> Self {
        let page = |path: &str, permission| Route::protected(path, Requirement::single(permission));

        Self::new(
            vec![
                Route::anonymous("/auth"),
                Route::protected("/dashboard", Requirement::None),
                page("/usuarios", USUARIOS_LEER),
                page("/clientes", CLIENTES_LEER),
                page("/bodegas", BODEGAS_LEER),
                page("/categorias", CATEGORIAS_LEER),
                page("/productos", PRODUCTOS_LEER),
                page("/inventario", INVENTARIO_LEER),
                page("/transferencias", TRANSFERENCIAS_LEER),
                page("/punto-venta", VENTAS_CREAR),
                page("/ventas", VENTAS_LEER),
                page("/compras", COMPRAS_LEER),
                page("/proveedores", PROVEEDORES_LEER),
            ],
            "/dashboard",
            "/dashboard",
        )
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Exact match after trimming a trailing slash and query string.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        if path == "/" {
            return Resolution::Redirect(Redirect::replace(&self.home));
        }

        match self.get(path) {
            Some(route) => Resolution::Route(route),
            None => Resolution::Redirect(Redirect::replace(&self.not_found)),
        }
    }

    /// Resolve `path` and run the guard on the matched route.
    pub fn navigate(
        &self,
        path: &str,
        state: &SessionState,
        guard: &RouteGuard,
        now: DateTime<Utc>,
    ) -> GuardOutcome {
        match self.resolve(path) {
            Resolution::Route(route) => guard.check(route, state, now),
            Resolution::Redirect(redirect) => GuardOutcome::Redirect(redirect),
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::application()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_unknown_paths_redirect_to_dashboard() {
        let table = RouteTable::application();
        assert_eq!(table.resolve("/"), Resolution::Redirect(Redirect::replace("/dashboard")));
        assert_eq!(table.resolve(""), Resolution::Redirect(Redirect::replace("/dashboard")));
        assert_eq!(table.resolve("/nope"), Resolution::Redirect(Redirect::replace("/dashboard")));
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        let table = RouteTable::application();
        let Resolution::Route(route) = table.resolve("/productos/?page=2") else {
            panic!("expected route");
        };
        assert_eq!(route.path, "/productos");
    }

    #[test]
    fn every_menu_route_is_in_the_table() {
        let table = RouteTable::application();
        for node in crate::menu::application_menu() {
            for path in node.routes() {
                assert!(table.get(path).is_some(), "{path} missing from route table");
            }
        }
    }
}
