//! Built-in event data.
//!
//! Add new events here and they appear on the events pages in this order.

use crate::types::{Category, Event, EventDetails, EventStatus, FaqEntry, ScheduleItem, Winner};

fn slot(time: &str, title: &str, description: &str) -> ScheduleItem {
    ScheduleItem {
        time: time.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn faq(question: &str, answer: &str) -> FaqEntry {
    FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

fn winner(place: &str, team: &str, project: &str, description: &str) -> Winner {
    Winner {
        place: place.to_string(),
        team: team.to_string(),
        project: project.to_string(),
        description: description.to_string(),
    }
}

fn hackml_2026() -> Event {
    Event {
        tagline: Some("Build the Future with Machine Learning".to_string()),
        long_description: Some(
            "Join us for an intensive 12-hour hackathon focused on machine learning and artificial \
             intelligence. Whether you're a beginner or an experienced ML practitioner, HackML offers \
             opportunities to learn, collaborate, and innovate. Work in teams of up to 4 people to \
             develop ML-powered applications, receive mentorship from industry professionals, and \
             compete for small prizes."
                .to_string(),
        ),
        time: Some("8:30 AM - 8:30 PM".to_string()),
        capacity: Some("125 participants".to_string()),
        registration_link: Some("https://portal-hackml.vercel.app/".to_string()),
        details: Some(EventDetails {
            eligibility: Some(
                "Open to all SFU students and students from other universities. All skill levels welcome."
                    .to_string(),
            ),
            team_size: Some(
                "Teams of 1-4 people. Register individually, and use the team code to add members to \
                 your team. Team formation will be done through Discord."
                    .to_string(),
            ),
            prizes: Some("$200 in small prizes for winning teams.".to_string()),
            food: Some("Meals and beverages provided throughout the event.".to_string()),
        }),
        schedule: Some(vec![
            slot("8:30 AM", "Check-ins", "Participant check-in"),
            slot("9:00 AM", "Opening Ceremony", "Welcome, agenda, rules, and team formation"),
            slot("9:30 AM", "Competition Begins", "Datasets and problems released for teams"),
            slot("12:00 PM", "Lunch", "Sushi from T&T - Limit 8 per person (until further notice)"),
            slot(
                "3:00 PM",
                "Mid-point Check-ins",
                "Brief progress update and Q&A session with competition organizers",
            ),
            slot(
                "6:00 PM",
                "Final Submission Deadline",
                "All model submissions must be completed and submitted through Kaggle by this time",
            ),
            slot(
                "6:15 PM",
                "Dinner + Networking",
                "Pizza from Dominoes, and open networking with industry professionals and DSSS executives.",
            ),
            slot(
                "8:15 PM",
                "Result + Prizes + Closing Ceremony",
                "Prizes awarded + Judges gifts + Group photo",
            ),
        ]),
        faq: Some(vec![
            faq(
                "Do I need ML experience?",
                "No! We welcome all skill levels. We'll have workshops and mentors to help beginners \
                 get started with machine learning.",
            ),
            faq(
                "What should I bring?",
                "Bring your laptop, charger, and any other devices you need. We'll provide food, \
                 drinks, and workspace.",
            ),
            faq(
                "Can I work alone?",
                "Yes! You can participate individually or in teams of up to 4 people. We'll also have \
                 a team formation session.",
            ),
            faq(
                "Is there a registration fee?",
                "No, HackML is completely free to attend. All meals and resources are provided.",
            ),
        ]),
        ..Event::new(
            "hackml-2026",
            "HackML 2026",
            "HackML 2026 is the first machine-learning-focused hackathon at SFU, where teams attempt \
             to construct the best ML-models for each given question.",
            "January 31st, 2026",
            "SFU Burnaby Campus - SUB Ballroom",
            EventStatus::RegistrationOpen,
            Category::Hackathon,
        )
    }
}

fn hackml_2025() -> Event {
    Event {
        tagline: Some("Our Inaugural ML Hackathon".to_string()),
        long_description: Some(
            "HackML 2025 was our inaugural machine learning hackathon that brought together over 80 \
             students from SFU and surrounding universities. Participants worked on diverse ML \
             projects ranging from image classification to natural language processing."
                .to_string(),
        ),
        time: Some("24 hours".to_string()),
        highlights: Some(vec![
            "80+ participants from 5 universities".to_string(),
            "15 project submissions".to_string(),
            "8 industry mentors".to_string(),
            "$3,000 in prizes awarded".to_string(),
        ]),
        winners: Some(vec![
            winner(
                "1st Place",
                "Team DataMinds",
                "AI-Powered Study Assistant",
                "An ML model that generates personalized study materials and practice questions.",
            ),
            winner(
                "2nd Place",
                "Neural Navigators",
                "Campus Traffic Predictor",
                "Real-time prediction of campus foot traffic using computer vision.",
            ),
            winner(
                "3rd Place",
                "Code Crunchers",
                "Mental Health Chatbot",
                "NLP-based chatbot for student mental health support.",
            ),
        ]),
        ..Event::new(
            "hackml-2025",
            "HackML 2025",
            "The first-ever HackML hackathon with 80+ participants and 15 amazing project submissions.",
            "January 20-21, 2025",
            "SFU Burnaby Campus",
            EventStatus::Completed,
            Category::Hackathon,
        )
    }
}

/// The built-in events in display order
pub(crate) fn events() -> Vec<Event> {
    vec![
        hackml_2026(),
        hackml_2025(),
        Event::new(
            "deep-learning-workshop-2026",
            "Deep Learning Workshop Series",
            "A comprehensive 6-week workshop series covering neural networks, CNNs, RNNs, and \
             transformer architectures. Perfect for beginners and intermediate learners.",
            "March - April 2026",
            "Hybrid (In-person & Online)",
            EventStatus::RegistrationClosed,
            Category::Workshop,
        ),
        Event::new(
            "industry-panel-spring-2026",
            "Data Science Career Panel",
            "Hear from data science professionals about their career journeys, industry insights, \
             and practical advice for students entering the field.",
            "February 2026",
            "TBA",
            EventStatus::RegistrationClosed,
            Category::Panel,
        ),
    ]
}
