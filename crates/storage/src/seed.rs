use shared::domain::{
    Platform, Trainer, TrainerId, TrainerStatus, Webinar, WebinarId, WebinarStatus,
};

pub fn seed_webinars() -> Vec<Webinar> {
    vec![
        Webinar {
            id: WebinarId(1),
            title: "Basics of Fashion Design & Tailoring".into(),
            description: "Join our exclusive session to learn the fundamentals of fashion styling."
                .into(),
            trainer: "Smt. Lakshmi Prassanna".into(),
            date: "2026-01-25".into(),
            time: "10:00".into(),
            duration: "2 Hours".into(),
            platform: Platform::Zoom,
            link: "https://zoom.us/j/123456789".into(),
            status: WebinarStatus::Upcoming,
        },
        Webinar {
            id: WebinarId(2),
            title: "Saree Blouse Design Masterclass".into(),
            description: "Master the art of measuring and cutting perfect saree blouses.".into(),
            trainer: "Senior Instructor Anitha".into(),
            date: "2026-02-01".into(),
            time: "14:00".into(),
            duration: "3 Hours".into(),
            platform: Platform::GoogleMeet,
            link: "https://meet.google.com/abc-defg-hij".into(),
            status: WebinarStatus::Draft,
        },
    ]
}

pub fn seed_trainers() -> Vec<Trainer> {
    vec![
        Trainer {
            id: TrainerId(1),
            name: "Smt. Lakshmi Prassanna".into(),
            email: "lakshmi@prassanna.com".into(),
            phone: "+91 98765 43210".into(),
            role: "Founder & Lead Instructor".into(),
            status: TrainerStatus::Active,
        },
        Trainer {
            id: TrainerId(2),
            name: "Senior Instructor Anitha".into(),
            email: "anitha@prassanna.com".into(),
            phone: "+91 98765 43211".into(),
            role: "Blouse Design Specialist".into(),
            status: TrainerStatus::Active,
        },
    ]
}
