//! HTML templates for the dashboard.
//!
//! Plain `format!` templates with Tailwind CSS and Alpine.js from CDNs.

use depor_policy::{Sidebar, SidebarEntry, SidebarItem};
use depor_session::Principal;

const HEAD: &str = r##"<meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <script src="https://cdn.tailwindcss.com"></script>
    <script>
        tailwind.config = {
            theme: {
                extend: {
                    colors: {
                        primary: {
                            50: '#eff6ff',
                            100: '#dbeafe',
                            200: '#bfdbfe',
                            300: '#93c5fd',
                            400: '#60a5fa',
                            500: '#1d4ed8',
                            600: '#1e40af',
                            700: '#1e3a8a',
                            800: '#172554',
                            900: '#0f172a',
                        }
                    }
                }
            }
        }
    </script>
    <script defer src="https://unpkg.com/alpinejs@3.x.x/dist/cdn.min.js"></script>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
    <style>[x-cloak] { display: none !important; }</style>"##;

/// Full page with top bar and role-filtered sidebar.
pub fn layout(
    app_title: &str,
    page_title: &str,
    principal: &Principal,
    sidebar: &Sidebar,
    content: &str,
) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="es" x-data="{{ sidebarOpen: true }}">
<head>
    {HEAD}
    <title>{page_title} - {app_title}</title>
</head>
<body class="bg-gray-50 min-h-screen">
    {NAV}

    <div class="flex">
        {SIDEBAR}

        <main class="flex-1 p-6 lg:p-8">
            <div class="max-w-7xl mx-auto">
                <h1 class="text-2xl font-bold text-gray-900 mb-6">{page_title}</h1>
                {content}
            </div>
        </main>
    </div>
</body>
</html>"##,
        HEAD = HEAD,
        page_title = html_escape(page_title),
        app_title = html_escape(app_title),
        NAV = nav_template(app_title, principal),
        SIDEBAR = sidebar_template(sidebar),
    )
}

/// Stand-alone page without navigation (login, service errors).
pub fn bare_page(app_title: &str, content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="es">
<head>
    {HEAD}
    <title>{app_title}</title>
</head>
<body class="bg-gradient-to-br from-primary-600 via-primary-700 to-primary-900 min-h-screen flex items-center justify-center p-4">
    <div class="w-full max-w-md">
        <div class="text-center mb-8">
            <h1 class="text-3xl font-bold text-white">{app_title}</h1>
        </div>
        {content}
    </div>
</body>
</html>"##,
        app_title = html_escape(app_title),
    )
}

fn nav_template(app_title: &str, principal: &Principal) -> String {
    format!(
        r##"<nav class="bg-primary-600 text-white px-4 py-3 sticky top-0 z-50 shadow-lg">
        <div class="flex items-center justify-between">
            <div class="flex items-center gap-4">
                <button @click="sidebarOpen = !sidebarOpen" class="p-2 hover:bg-primary-700 rounded-lg lg:hidden">
                    <i class="fas fa-bars"></i>
                </button>
                <a href="/inicio" class="font-semibold text-lg">{app_title}</a>
            </div>
            <div class="flex items-center gap-4 text-sm">
                <span class="hidden md:inline"><i class="fas fa-user-circle mr-1"></i>{user}</span>
                <form method="POST" action="/logout">
                    <button type="submit" class="px-3 py-1.5 bg-primary-700 hover:bg-primary-800 rounded-lg">
                        <i class="fas fa-sign-out-alt mr-1"></i>Cerrar sesión
                    </button>
                </form>
            </div>
        </div>
    </nav>"##,
        app_title = html_escape(app_title),
        user = html_escape(principal.display_name()),
    )
}

fn sidebar_template(sidebar: &Sidebar) -> String {
    let items: String = sidebar
        .items
        .iter()
        .map(|item| match item {
            SidebarItem::Link(entry) => sidebar_link(entry, "px-4"),
            SidebarItem::Group {
                key,
                label,
                icon,
                expanded,
                entries,
            } => {
                let links: String = entries.iter().map(|e| sidebar_link(e, "pl-10 pr-4")).collect();
                format!(
                    r##"<div x-data="{{ open: {expanded} }}" data-group="{key}">
                    <button type="button" @click="open = !open"
                            class="w-full flex items-center gap-3 px-4 py-3 text-gray-700 hover:bg-primary-50 rounded-lg transition-colors">
                        <i class="fas fa-{icon} w-5"></i>
                        <span class="flex-1 text-left">{label}</span>
                        <i class="fas text-xs" :class="open ? 'fa-chevron-up' : 'fa-chevron-down'"></i>
                    </button>
                    <div x-show="open" x-cloak class="space-y-1">
                        {links}
                    </div>
                </div>"##
                )
            }
        })
        .collect();

    format!(
        r##"<aside class="w-72 bg-white border-r border-gray-200 min-h-[calc(100vh-56px)] transition-all duration-300"
              :class="{{ '-ml-72': !sidebarOpen }}"
              x-cloak>
            <nav class="p-4 space-y-1">
                {items}
            </nav>
        </aside>"##
    )
}

fn sidebar_link(entry: &SidebarEntry, padding: &str) -> String {
    let state = if entry.active {
        "bg-primary-50 text-primary-600 font-medium"
    } else {
        "text-gray-700 hover:bg-primary-50"
    };
    let current = if entry.active { r#" aria-current="page""# } else { "" };
    format!(
        r##"<a href="{path}"{current} class="flex items-center gap-3 {padding} py-2.5 {state} rounded-lg transition-colors">
                    <i class="fas fa-{icon} w-5"></i>
                    <span>{label}</span>
                </a>"##,
        path = entry.path,
        icon = entry.icon,
        label = entry.label,
    )
}

/// Card component.
pub fn card(title: &str, content: &str) -> String {
    format!(
        r##"<div class="bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden">
            <div class="px-6 py-4 border-b border-gray-200">
                <h3 class="text-lg font-semibold text-gray-900">{title}</h3>
            </div>
            <div class="p-6">
                {content}
            </div>
        </div>"##
    )
}

/// Alert colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Warning,
    Danger,
}

/// Inline alert box. The message is escaped.
pub fn alert(kind: AlertKind, message: &str) -> String {
    let (color, icon) = match kind {
        AlertKind::Success => ("green", "check-circle"),
        AlertKind::Warning => ("yellow", "exclamation-triangle"),
        AlertKind::Danger => ("red", "exclamation-circle"),
    };
    format!(
        r##"<div role="alert" class="mb-6 p-4 bg-{color}-50 border border-{color}-200 rounded-lg">
            <div class="flex items-center gap-3">
                <i class="fas fa-{icon} text-{color}-500"></i>
                <span class="text-{color}-700">{message}</span>
            </div>
        </div>"##,
        message = html_escape(message),
    )
}

/// Input field component.
pub fn input(name: &str, label: &str, input_type: &str, placeholder: &str, required: bool) -> String {
    let required = if required { " required" } else { "" };
    format!(
        r##"<div class="space-y-1">
            <label for="{name}" class="block text-sm font-medium text-gray-700">{label}</label>
            <input type="{input_type}" name="{name}" id="{name}" placeholder="{placeholder}"{required}
                   class="w-full px-4 py-2 border border-gray-300 rounded-lg bg-white text-gray-900 focus:ring-2 focus:ring-primary-500 focus:border-primary-500">
        </div>"##
    )
}

/// Checkbox group posting every checked value under `name`.
pub fn checkboxes(name: &str, label: &str, options: &[(String, String)]) -> String {
    let boxes: String = options
        .iter()
        .map(|(value, text)| {
            format!(
                r#"<label class="inline-flex items-center gap-2 mr-4 text-sm text-gray-700">
                    <input type="checkbox" name="{name}" value="{value}" class="rounded border-gray-300">{text}
                </label>"#,
                value = html_escape(value),
                text = html_escape(text),
            )
        })
        .collect();

    format!(
        r##"<div class="space-y-1">
            <span class="block text-sm font-medium text-gray-700">{label}</span>
            <div class="flex flex-wrap gap-y-2">{boxes}</div>
        </div>"##
    )
}

/// Badge component.
pub fn badge(text: &str, color: &str) -> String {
    format!(
        r##"<span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium bg-{color}-100 text-{color}-800">{text}</span>"##,
        text = html_escape(text),
    )
}

/// Empty state component.
pub fn empty_state(icon: &str, title: &str, description: &str) -> String {
    format!(
        r##"<div class="text-center py-12">
            <i class="fas fa-{icon} text-4xl text-gray-400 mb-4"></i>
            <h3 class="text-lg font-medium text-gray-900">{title}</h3>
            <p class="mt-1 text-gray-500">{description}</p>
        </div>"##
    )
}

/// Escape text for HTML element and attribute content.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
