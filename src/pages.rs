// Client-side page routes. The browser router owns navigation; the server only
// needs to answer these paths with index.html so deep links survive a reload.

/// Page component shown at a client route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    AddRecord,
    RecordList,
    Statistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRoute {
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
}

pub const PAGE_ROUTES: &[PageRoute] = &[
    PageRoute { path: "/", name: "HomePage", page: Page::Home },
    PageRoute { path: "/add", name: "AddRecord", page: Page::AddRecord },
    PageRoute { path: "/records", name: "RecordList", page: Page::RecordList },
    PageRoute { path: "/statistics", name: "StatisticsPage", page: Page::Statistics },
];

/// Find the page route for a request path.
pub fn find_page(path: &str) -> Option<&'static PageRoute> {
    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    };
    PAGE_ROUTES.iter().find(|route| route.path == path)
}
