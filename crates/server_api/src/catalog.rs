//! Public pages: home, portfolio, courses, policies and the webinar boards.
//!
//! Everything here is static marketing content except the per-visitor
//! webinar sign-ups, which live in the bounded in-memory [`WebinarSignups`].

use std::{
    collections::{BTreeSet, HashMap, VecDeque},
    sync::Arc,
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::error::{ApiError, ErrorCode};
use tokio::time::sleep;
use tracing::{debug, info};
use url::form_urlencoded;

use crate::{
    modal::{ModalContext, Offering},
    ApiContext,
};

pub mod layout;

use layout::SiteShell;

pub const ENQUIRY_MESSAGE: &str =
    "Hello! I am interested in learning more about your fashion design courses.";
pub const COUNSELLING_MESSAGE: &str = "Hello! I would like to schedule a free counseling session.";

/// Builds a `wa.me` deep link with the message form-encoded into `text`.
pub fn whatsapp_link(number: &str, message: &str) -> String {
    let text: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("https://wa.me/{number}?text={text}")
}

fn site_shell(ctx: &ApiContext) -> SiteShell {
    SiteShell::new(whatsapp_link(&ctx.site.whatsapp_number, ENQUIRY_MESSAGE))
}

#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub id: u32,
    pub name: &'static str,
    pub duration: &'static str,
    pub mode: &'static str,
    pub price: u32,
    pub description: &'static str,
}

impl Program {
    pub fn registration_context(&self) -> ModalContext {
        ModalContext::Registration {
            offering: Offering::Course,
            title: self.name.into(),
            is_paid: false,
            price: 0,
        }
    }

    pub fn payment_context(&self) -> ModalContext {
        ModalContext::Payment {
            course_name: self.name.into(),
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedWebinar {
    pub id: u32,
    pub title: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub mode: &'static str,
    pub fee: u32,
    pub is_free: bool,
}

impl FeaturedWebinar {
    pub fn registration_context(&self) -> ModalContext {
        ModalContext::Registration {
            offering: Offering::Webinar,
            title: self.title.into(),
            is_paid: !self.is_free,
            price: self.fee,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: &'static str,
    pub image: &'static str,
    pub text: &'static str,
    pub course: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Image {
    pub src: &'static str,
    pub alt: &'static str,
}

pub const HOME_STATS: &[Stat] = &[
    Stat {
        value: "500+",
        label: "Students Trained",
    },
    Stat {
        value: "15+",
        label: "Years Experience",
    },
    Stat {
        value: "100+",
        label: "Success Stories",
    },
    Stat {
        value: "1000+",
        label: "Hours of Training",
    },
];

pub const PROGRAMS: &[Program] = &[
    Program {
        id: 1,
        name: "Fashion Design Fundamentals",
        duration: "1 Month",
        mode: "Online",
        price: 4999,
        description: "Perfect for beginners. Learn the basics of fashion design, sketching, \
                      and fabric selection.",
    },
    Program {
        id: 2,
        name: "Professional Tailoring Course",
        duration: "3 Months",
        mode: "Offline",
        price: 14999,
        description: "Master professional tailoring techniques with hands-on training and \
                      real-world projects.",
    },
    Program {
        id: 3,
        name: "Advanced Fashion Design",
        duration: "6 Months",
        mode: "Hybrid",
        price: 29999,
        description: "Comprehensive program covering all aspects of fashion design from \
                      concept to creation.",
    },
];

pub const FEATURED_WEBINARS: &[FeaturedWebinar] = &[
    FeaturedWebinar {
        id: 1,
        title: "Introduction to Fashion Design",
        date: "January 25, 2026",
        time: "10:00 AM IST",
        mode: "Online (Zoom)",
        fee: 0,
        is_free: true,
    },
    FeaturedWebinar {
        id: 2,
        title: "Saree Blouse Design Masterclass",
        date: "February 1, 2026",
        time: "2:00 PM IST",
        mode: "Online (Zoom)",
        fee: 499,
        is_free: false,
    },
];

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        id: 1,
        name: "Priya Sharma",
        image: "testimonial-1.jpg",
        text: "Lakshmi Ma'am made learning so easy! I started my own boutique within 6 months \
               of completing the course.",
        course: "Advanced Fashion Design",
    },
    Testimonial {
        id: 2,
        name: "Anitha Reddy",
        image: "testimonial-2.jpg",
        text: "The hands-on training was excellent. I now design for local exhibitions and \
               fashion shows.",
        course: "Professional Tailoring",
    },
    Testimonial {
        id: 3,
        name: "Sunitha Kumari",
        image: "testimonial-3.jpg",
        text: "As a homemaker, this course gave me a new identity. I'm now financially \
               independent.",
        course: "3 Month Course",
    },
];

pub const PORTFOLIO_PREVIEW: &[Image] = &[
    Image { src: "portfolio-bridal.jpg", alt: "Bridal Collection" },
    Image { src: "portfolio-couture.jpg", alt: "Couture Design" },
    Image { src: "portfolio-casual.jpg", alt: "Casual Wear" },
    Image { src: "portfolio-student.jpg", alt: "Student Work" },
];

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub badge: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub shell: SiteShell,
    pub hero: Hero,
    pub stats: &'static [Stat],
    pub programs: &'static [Program],
    pub webinars: &'static [FeaturedWebinar],
    pub testimonials: &'static [Testimonial],
    pub portfolio_preview: &'static [Image],
}

pub fn home_page(ctx: &ApiContext) -> HomePage {
    HomePage {
        shell: site_shell(ctx),
        hero: Hero {
            badge: "15+ Years of Excellence",
            title: "Learn Fashion Design from an Industry-Proven Designer",
            subtitle: "Professional fashion education, real-world exposure & career-focused \
                       training. Empowering women to build their own fashion careers.",
        },
        stats: HOME_STATS,
        programs: PROGRAMS,
        webinars: FEATURED_WEBINARS,
        testimonials: TESTIMONIALS,
        portfolio_preview: PORTFOLIO_PREVIEW,
    }
}

pub const ALL_CATEGORIES: &str = "All";
pub const PORTFOLIO_CATEGORIES: &[&str] = &["All", "Bridal", "Couture", "Casual", "Student Works"];

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioItem {
    pub id: u32,
    pub src: &'static str,
    pub title: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowcaseEvent {
    pub id: u32,
    pub title: &'static str,
    pub date: &'static str,
    pub venue: &'static str,
    pub image: &'static str,
    pub kind: &'static str,
}

const fn item(
    id: u32,
    src: &'static str,
    title: &'static str,
    category: &'static str,
) -> PortfolioItem {
    PortfolioItem {
        id,
        src,
        title,
        category,
    }
}

pub const PORTFOLIO_ITEMS: &[PortfolioItem] = &[
    item(1, "portfolio-bridal.jpg", "Bridal Lehenga", "Bridal"),
    item(2, "portfolio-couture.jpg", "Designer Gown", "Couture"),
    item(3, "portfolio-casual.jpg", "Modern Kurta", "Casual"),
    item(4, "portfolio-student.jpg", "Student Design", "Student Works"),
    item(5, "portfolio-bridal.jpg", "Wedding Saree", "Bridal"),
    item(6, "portfolio-couture.jpg", "Evening Wear", "Couture"),
    item(7, "portfolio-casual.jpg", "Daily Wear", "Casual"),
    item(8, "portfolio-student.jpg", "Graduation Project", "Student Works"),
];

pub const SHOWCASE_EVENTS: &[ShowcaseEvent] = &[
    ShowcaseEvent {
        id: 1,
        title: "Hyderabad Fashion Week 2025",
        date: "December 2025",
        venue: "HITEX Convention Centre",
        image: "fashion-event.jpg",
        kind: "Fashion Show",
    },
    ShowcaseEvent {
        id: 2,
        title: "Student Graduation Show",
        date: "October 2025",
        venue: "Institute Campus",
        image: "fashion-event.jpg",
        kind: "Exhibition",
    },
];

/// Gallery items in `category`. `All` returns everything; a category nobody
/// uses returns nothing.
pub fn filter_portfolio(category: &str) -> Vec<PortfolioItem> {
    if category == ALL_CATEGORIES {
        return PORTFOLIO_ITEMS.to_vec();
    }
    PORTFOLIO_ITEMS
        .iter()
        .filter(|item| item.category == category)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Founder {
    pub name: &'static str,
    pub bio: &'static [&'static str],
    pub quote: &'static str,
    pub mission: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPage {
    pub shell: SiteShell,
    pub founder: Founder,
    pub categories: &'static [&'static str],
    pub active_category: String,
    pub items: Vec<PortfolioItem>,
    pub events: &'static [ShowcaseEvent],
}

pub fn portfolio_page(ctx: &ApiContext, category: Option<&str>) -> PortfolioPage {
    let active_category = category.unwrap_or(ALL_CATEGORIES).to_string();
    PortfolioPage {
        shell: site_shell(ctx),
        founder: Founder {
            name: "Smt. Lakshmi Prassanna Gollapudi",
            bio: &[
                "Prassanna Fashion Institute was founded by Smt. Lakshmi Prassanna Gollapudi, a \
                 passionate fashion designer who completed her B.F. Tech in Fashion Design from \
                 NIFT Hyderabad.",
                "With over 15 years of experience, she has trained thousands of women across \
                 the twin cities. Many of her alumni have started their own boutiques and \
                 tailoring businesses.",
            ],
            quote: "When a woman becomes strong and independent, the entire family becomes \
                    strong.",
            mission: "Our mission is empowering women to stand on their own feet, build \
                      confidence, and create a unique identity in fashion.",
        },
        categories: PORTFOLIO_CATEGORIES,
        items: filter_portfolio(&active_category),
        active_category,
        events: SHOWCASE_EVENTS,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: u32,
    pub name: &'static str,
    pub duration: &'static str,
    pub mode: &'static str,
    pub price: u32,
    pub image: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
    pub popular: bool,
}

impl Course {
    pub fn enrol_context(&self) -> ModalContext {
        ModalContext::Registration {
            offering: Offering::Course,
            title: self.name.into(),
            is_paid: false,
            price: 0,
        }
    }

    pub fn payment_context(&self) -> ModalContext {
        ModalContext::Payment {
            course_name: self.name.into(),
            price: self.price,
        }
    }
}

pub const COURSES: &[Course] = &[
    Course {
        id: 1,
        name: "1 Month Foundation Course",
        duration: "1 Month",
        mode: "Online & Offline",
        price: 4999,
        image: "portfolio-casual.jpg",
        description: "Perfect for beginners who want to explore fashion design.",
        highlights: &[
            "Basic sketching and illustration",
            "Introduction to fabrics and textiles",
            "Understanding body measurements",
            "Basic stitching techniques",
            "Pattern making fundamentals",
            "Certificate of completion",
        ],
        popular: false,
    },
    Course {
        id: 2,
        name: "3 Month Professional Course",
        duration: "3 Months",
        mode: "Offline (Hyderabad)",
        price: 14999,
        image: "portfolio-couture.jpg",
        description: "Comprehensive training for those serious about fashion design.",
        highlights: &[
            "Advanced pattern making",
            "Blouse, saree, and dress construction",
            "Embroidery and embellishment techniques",
            "Fashion illustration and CAD",
            "Portfolio development",
            "Industry exposure visits",
            "Internship opportunities",
            "Professional certification",
        ],
        popular: true,
    },
    Course {
        id: 3,
        name: "6 Month Advanced Diploma",
        duration: "6 Months",
        mode: "Hybrid (Online + Offline)",
        price: 29999,
        image: "portfolio-bridal.jpg",
        description: "Complete fashion education for aspiring professionals.",
        highlights: &[
            "Everything in 3 Month course",
            "Bridal and couture designing",
            "Business and entrepreneurship skills",
            "Fashion show participation",
            "One-on-one mentorship",
            "Placement assistance",
            "Lifetime alumni support",
            "Advanced diploma certificate",
        ],
        popular: false,
    },
];

pub fn find_course(id: u32) -> Option<&'static Course> {
    COURSES.iter().find(|course| course.id == id)
}

pub fn find_program(id: u32) -> Option<&'static Program> {
    PROGRAMS.iter().find(|program| program.id == id)
}

pub fn find_featured_webinar(id: u32) -> Option<&'static FeaturedWebinar> {
    FEATURED_WEBINARS.iter().find(|webinar| webinar.id == id)
}

#[derive(Debug, Clone, Serialize)]
pub struct CoursesPage {
    pub shell: SiteShell,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub courses: &'static [Course],
    pub counselling_link: String,
}

pub fn courses_page(ctx: &ApiContext) -> CoursesPage {
    CoursesPage {
        shell: site_shell(ctx),
        title: "Choose Your Path to Fashion Excellence",
        subtitle: "Industry-designed curriculum with practical training, real-world projects, \
                   and career support.",
        courses: COURSES,
        counselling_link: whatsapp_link(&ctx.site.whatsapp_number, COUNSELLING_MESSAGE),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyBlock {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
    pub items: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicySection {
    /// Anchor used by `/policies#<anchor>` links.
    pub anchor: &'static str,
    pub title: &'static str,
    pub intro: &'static str,
    pub blocks: &'static [PolicyBlock],
}

const fn block(
    heading: &'static str,
    paragraphs: &'static [&'static str],
    items: &'static [&'static str],
) -> PolicyBlock {
    PolicyBlock {
        heading,
        paragraphs,
        items,
    }
}

pub const POLICY_SECTIONS: &[PolicySection] = &[
    PolicySection {
        anchor: "privacy",
        title: "Privacy Policy",
        intro: "At Prassanna Fashion Designs and Institute Pvt. Ltd., we are committed to \
                protecting your privacy and ensuring the security of your personal information.",
        blocks: &[
            block(
                "Information We Collect",
                &[],
                &[
                    "Personal Information: name, email address, phone number and mailing \
                     address when you register for courses or events.",
                    "Payment Information: card details are processed through our payment \
                     gateway and are not stored on our servers.",
                    "Course Progress: enrollment, attendance and progress in our programs.",
                    "Communication Data: records of emails and WhatsApp messages with us.",
                ],
            ),
            block(
                "How We Use Your Information",
                &[],
                &[
                    "To process your course registrations and payments",
                    "To send you course materials and updates",
                    "To communicate about upcoming events and workshops",
                    "To improve our services and course content",
                    "To respond to your inquiries and provide customer support",
                ],
            ),
            block(
                "Data Protection",
                &["We implement technical and organizational measures to protect your \
                   personal data against unauthorized access, alteration, disclosure or \
                   destruction."],
                &[],
            ),
            block(
                "Your Rights",
                &[],
                &[
                    "Access your personal data that we hold",
                    "Request correction of inaccurate information",
                    "Request deletion of your data (subject to legal requirements)",
                    "Opt-out of marketing communications",
                ],
            ),
        ],
    },
    PolicySection {
        anchor: "refund",
        title: "Refund Policy",
        intro: "We want you to be completely satisfied with your learning experience. Please \
                read our refund policy carefully.",
        blocks: &[
            block(
                "Full Refund (100%)",
                &[],
                &[
                    "Cancellation request received at least 7 days before course start date",
                    "Course cancelled by the institute",
                ],
            ),
            block(
                "Partial Refund (50%)",
                &[],
                &[
                    "Cancellation request received 3-6 days before course start date",
                    "Withdrawal within first 2 classes (for long-term courses)",
                ],
            ),
            block(
                "No Refund",
                &[],
                &[
                    "Cancellation request less than 3 days before course start",
                    "After attending more than 2 classes",
                    "Webinars and workshops (due to their one-time nature)",
                ],
            ),
            block(
                "How to Request a Refund",
                &[],
                &[
                    "Send an email to refunds@prassannafashion.com",
                    "Include your full name, course name, registration date, and reason for \
                     cancellation",
                    "Our team will review your request within 2-3 business days",
                    "Approved refunds will be processed within 7-10 business days",
                ],
            ),
            block(
                "Course Transfer Option",
                &["Instead of a refund, you may transfer your enrollment to a future batch of \
                   the same course, up to 24 hours before the course starts, once per \
                   enrollment."],
                &[],
            ),
        ],
    },
    PolicySection {
        anchor: "payment",
        title: "Payment Security",
        intro: "Your payment security is our top priority. We use industry-standard security \
                measures to protect your financial information.",
        blocks: &[
            block(
                "Safeguards",
                &[],
                &[
                    "SSL Encryption: all transactions are encrypted using 256-bit SSL.",
                    "PCI Compliant: our payment gateway is PCI DSS Level 1 compliant.",
                    "Secure Gateway: we partner with trusted payment processors.",
                    "Instant Confirmation: immediate email confirmation for all payments.",
                ],
            ),
            block(
                "Accepted Payment Methods",
                &[],
                &[
                    "Credit Cards (Visa, MasterCard, American Express)",
                    "Debit Cards",
                    "UPI Payments",
                    "Net Banking",
                    "EMI Options (for select courses)",
                ],
            ),
        ],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct PoliciesPage {
    pub shell: SiteShell,
    pub last_updated: &'static str,
    pub sections: &'static [PolicySection],
    pub contact_email: &'static str,
    pub contact_phone: &'static str,
}

pub fn policies_page(ctx: &ApiContext) -> PoliciesPage {
    PoliciesPage {
        shell: site_shell(ctx),
        last_updated: "January 2026",
        sections: POLICY_SECTIONS,
        contact_email: layout::FOOTER.email,
        contact_phone: layout::FOOTER.phone,
    }
}

/// Which webinar board a sign-up was made on. The public listing and the
/// learner dashboard keep separate registration sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Board {
    Listing,
    Dashboard,
}

pub const MAX_TRACKED_VISITORS: usize = 10_000;

type SignupKey = (Board, String);

#[derive(Default)]
struct SignupBook {
    sets: HashMap<SignupKey, BTreeSet<u32>>,
    /// Keys in the order their first sign-up arrived.
    order: VecDeque<SignupKey>,
}

/// Registered webinar ids per visitor and board. Each set only holds ids of
/// known webinars. At most `capacity` visitor sets are kept; a new visitor
/// beyond that pushes out the set that was started first.
#[derive(Clone)]
pub struct WebinarSignups {
    inner: Arc<Mutex<SignupBook>>,
    capacity: usize,
}

impl Default for WebinarSignups {
    fn default() -> Self {
        Self::with_capacity(MAX_TRACKED_VISITORS)
    }
}

impl WebinarSignups {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    /// Records the sign-up. Returns `false` if the visitor was already registered.
    pub fn register(&self, board: Board, visitor: &str, webinar_id: u32) -> bool {
        let mut book = self.inner.lock();
        let key = (board, visitor.to_string());
        if let Some(set) = book.sets.get_mut(&key) {
            return set.insert(webinar_id);
        }

        while book.order.len() >= self.capacity {
            let Some(oldest) = book.order.pop_front() else {
                break;
            };
            book.sets.remove(&oldest);
            debug!(visitor = %oldest.1, "forgot oldest visitor sign-ups");
        }
        book.order.push_back(key.clone());
        book.sets.insert(key, BTreeSet::from([webinar_id]));
        true
    }

    pub fn registered(&self, board: Board, visitor: &str) -> BTreeSet<u32> {
        self.inner
            .lock()
            .sets
            .get(&(board, visitor.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        let mut book = self.inner.lock();
        book.sets.clear();
        book.order.clear();
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.lock().sets.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListedWebinar {
    pub id: u32,
    pub title: &'static str,
    pub trainer: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub mode: &'static str,
    pub description: &'static str,
    pub join_link: &'static str,
}

pub const LISTED_WEBINARS: &[ListedWebinar] = &[
    ListedWebinar {
        id: 1,
        title: "Basics of Fashion Design & Tailoring",
        trainer: "Smt. Lakshmi Prassanna",
        date: "January 25, 2026",
        time: "10:00 AM IST",
        mode: "Online (Zoom)",
        description: "Join our exclusive session to learn the fundamentals of fashion styling, \
                      fabric selection, and professional tailoring techniques. Suitable for \
                      beginners.",
        join_link: "https://zoom.us/j/placeholder",
    },
    ListedWebinar {
        id: 2,
        title: "Saree Blouse Design Masterclass",
        trainer: "Senior Instructor Anitha",
        date: "February 1, 2026",
        time: "2:00 PM IST",
        mode: "Online (Google Meet)",
        description: "Master the art of measuring and cutting perfect saree blouses. Learn about \
                      different necklines and finishing touches.",
        join_link: "https://meet.google.com/placeholder",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct WebinarCard {
    #[serde(flatten)]
    pub webinar: ListedWebinar,
    pub registered: bool,
    /// The join button stays disabled until shortly before the session.
    pub join_enabled: bool,
    pub join_hint: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebinarsPage {
    pub shell: SiteShell,
    pub my_webinars: Vec<WebinarCard>,
    pub upcoming: Vec<WebinarCard>,
}

pub fn webinars_page(ctx: &ApiContext, visitor: &str) -> WebinarsPage {
    let registered = ctx.signups.registered(Board::Listing, visitor);
    let (mine, upcoming): (Vec<_>, Vec<_>) = LISTED_WEBINARS
        .iter()
        .partition(|webinar| registered.contains(&webinar.id));

    let card = |webinar: &ListedWebinar, registered: bool| WebinarCard {
        webinar: webinar.clone(),
        registered,
        join_enabled: false,
        join_hint: registered.then_some("Link activates 15 mins before start"),
    };

    WebinarsPage {
        shell: site_shell(ctx),
        my_webinars: mine.into_iter().map(|webinar| card(webinar, true)).collect(),
        upcoming: upcoming.into_iter().map(|webinar| card(webinar, false)).collect(),
    }
}

/// Registers the visitor for a listed webinar after the simulated round trip.
/// Registering twice is harmless.
pub async fn register_for_webinar(
    ctx: &ApiContext,
    visitor: &str,
    webinar_id: u32,
) -> Result<WebinarsPage, ApiError> {
    if !LISTED_WEBINARS.iter().any(|webinar| webinar.id == webinar_id) {
        return Err(ApiError::not_found("Webinar not found", "/webinars"));
    }
    sleep(ctx.site.webinar_signup_delay).await;
    if ctx.signups.register(Board::Listing, visitor, webinar_id) {
        info!(webinar_id, visitor, "visitor registered for webinar");
    }
    Ok(webinars_page(ctx, visitor))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    #[default]
    Upcoming,
    Live,
    Completed,
}

impl DashboardTab {
    /// Unknown tab names fall back to the upcoming tab.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("live") => DashboardTab::Live,
            Some("completed") => DashboardTab::Completed,
            _ => DashboardTab::Upcoming,
        }
    }

    pub fn empty_message(self) -> Option<&'static str> {
        match self {
            DashboardTab::Upcoming => Some("No upcoming webinars found"),
            DashboardTab::Live => Some("No live sessions at the moment"),
            DashboardTab::Completed => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionListing {
    pub id: u32,
    pub title: &'static str,
    pub trainer: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub platform: &'static str,
    #[serde(skip)]
    pub tab: DashboardTab,
    pub description: &'static str,
}

pub const DASHBOARD_WEBINARS: &[SessionListing] = &[
    SessionListing {
        id: 1,
        title: "Saree Blouse Design Masterclass",
        trainer: "Senior Instructor Anitha",
        date: "February 1, 2026",
        time: "2:00 PM IST",
        platform: "Google Meet",
        tab: DashboardTab::Upcoming,
        description: "Master the art of measuring and cutting perfect saree blouses.",
    },
    SessionListing {
        id: 2,
        title: "Advanced Embroidery Techniques",
        trainer: "Smt. Lakshmi Prassanna",
        date: "February 5, 2026",
        time: "11:00 AM IST",
        platform: "Zoom",
        tab: DashboardTab::Upcoming,
        description: "Learn intricate embroidery stitches and embellishment methods.",
    },
    SessionListing {
        id: 3,
        title: "Fabric Science & Selection",
        trainer: "Smt. Lakshmi Prassanna",
        date: "January 10, 2026",
        time: "10:00 AM IST",
        platform: "Zoom",
        tab: DashboardTab::Completed,
        description: "Understanding different fabrics and their suitable applications.",
    },
    SessionListing {
        id: 4,
        title: "Live Q&A: Fashion Careers",
        trainer: "Industry Experts",
        date: "Today",
        time: "Now",
        platform: "Zoom",
        tab: DashboardTab::Live,
        description: "Join us now for a live session on career opportunities in fashion.",
    },
];

pub const LIVE_JOIN_LINK: &str = "https://meet.google.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardAction {
    Join { link: &'static str },
    Ended,
    Registered,
    Register,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardCard {
    #[serde(flatten)]
    pub webinar: SessionListing,
    pub badge: &'static str,
    pub action: CardAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearnerDashboard {
    pub title: &'static str,
    pub tab: DashboardTab,
    pub cards: Vec<DashboardCard>,
    pub empty_message: Option<&'static str>,
}

fn dashboard_card(webinar: &SessionListing, registered: bool) -> DashboardCard {
    let (badge, action) = match (webinar.tab, registered) {
        (DashboardTab::Live, _) => ("Live Now", CardAction::Join { link: LIVE_JOIN_LINK }),
        (DashboardTab::Completed, _) => ("Completed", CardAction::Ended),
        (DashboardTab::Upcoming, true) => ("Registered", CardAction::Registered),
        (DashboardTab::Upcoming, false) => ("Upcoming", CardAction::Register),
    };
    DashboardCard {
        webinar: webinar.clone(),
        badge,
        action,
    }
}

pub fn learner_dashboard(ctx: &ApiContext, visitor: &str, tab: DashboardTab) -> LearnerDashboard {
    let registered = ctx.signups.registered(Board::Dashboard, visitor);
    let cards: Vec<_> = DASHBOARD_WEBINARS
        .iter()
        .filter(|webinar| webinar.tab == tab)
        .map(|webinar| dashboard_card(webinar, registered.contains(&webinar.id)))
        .collect();
    LearnerDashboard {
        title: "Webinar Dashboard",
        tab,
        empty_message: if cards.is_empty() {
            tab.empty_message()
        } else {
            None
        },
        cards,
    }
}

/// Dashboard sign-ups happen immediately and only for upcoming sessions.
pub fn register_on_dashboard(
    ctx: &ApiContext,
    visitor: &str,
    webinar_id: u32,
) -> Result<LearnerDashboard, ApiError> {
    let webinar = DASHBOARD_WEBINARS
        .iter()
        .find(|webinar| webinar.id == webinar_id)
        .ok_or_else(|| ApiError::not_found("Webinar not found", "/dashboard/webinars"))?;
    if webinar.tab != DashboardTab::Upcoming {
        return Err(ApiError::new(
            ErrorCode::Conflict,
            "registration is only open for upcoming webinars",
        ));
    }
    ctx.signups.register(Board::Dashboard, visitor, webinar_id);
    debug!(webinar_id, visitor, "dashboard registration");
    Ok(learner_dashboard(ctx, visitor, DashboardTab::Upcoming))
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundPage {
    pub status: u16,
    pub path: String,
    pub title: &'static str,
    pub message: &'static str,
    pub home: &'static str,
}

pub fn not_found_page(path: &str) -> NotFoundPage {
    NotFoundPage {
        status: 404,
        path: path.to_string(),
        title: "Page Not Found",
        message: "The page you're looking for doesn't exist or has been moved.",
        home: "/",
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
