//! Navigation and footer tables shared by every page shell.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

const fn link(name: &'static str, path: &'static str) -> NavLink {
    NavLink { name, path }
}

pub const SITE_NAV: &[NavLink] = &[
    link("Home", "/"),
    link("Portfolio", "/portfolio"),
    link("Courses", "/courses"),
    link("Webinars", "/webinars"),
];

pub const ADMIN_NAV: &[NavLink] = &[
    link("Dashboard", "/admin/dashboard"),
    link("Webinars", "/admin/webinars"),
    link("Trainers", "/admin/trainers"),
    link("Registrations", "/admin/registrations"),
    link("Live Sessions", "/admin/live-sessions"),
    link("Settings", "/admin/settings"),
];

pub const FOOTER_LINKS: &[NavLink] = &[
    link("Home", "/"),
    link("Portfolio", "/portfolio"),
    link("Courses", "/courses"),
    link("Privacy Policy", "/policies"),
    link("Refund Policy", "/policies#refund"),
];

#[derive(Debug, Clone, Serialize)]
pub struct Footer {
    pub tagline: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub phone_href: &'static str,
    pub email: &'static str,
    pub links: &'static [NavLink],
    pub copyright: &'static str,
}

pub const FOOTER: Footer = Footer {
    tagline: "Professional fashion education with real-world exposure and career-focused \
              training. Empowering women through skill development.",
    address: "Hyderabad, Telangana, India",
    phone: "+91 63024 58752",
    phone_href: "tel:+916302458752",
    email: "info@prassannafashion.com",
    links: FOOTER_LINKS,
    copyright: "Prassanna Fashion Designs and Institute Pvt. Ltd. All rights reserved.",
};

/// Chrome wrapped around the public pages.
#[derive(Debug, Clone, Serialize)]
pub struct SiteShell {
    pub nav: &'static [NavLink],
    pub cta: NavLink,
    pub footer: Footer,
    pub whatsapp_link: String,
}

impl SiteShell {
    pub fn new(whatsapp_link: String) -> Self {
        Self {
            nav: SITE_NAV,
            cta: link("Enroll Now", "/courses"),
            footer: FOOTER,
            whatsapp_link,
        }
    }
}

/// Chrome wrapped around the admin console pages.
#[derive(Debug, Clone, Serialize)]
pub struct AdminShell {
    pub nav: &'static [NavLink],
    pub active: &'static str,
    pub subtitle: Option<&'static str>,
}

impl AdminShell {
    pub fn new(active: &'static str, subtitle: Option<&'static str>) -> Self {
        Self {
            nav: ADMIN_NAV,
            active,
            subtitle,
        }
    }
}
