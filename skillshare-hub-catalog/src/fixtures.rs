//! Demo marketplace data served until real listings exist.

use chrono::NaiveDateTime;

use crate::conversations::{Conversation, Message};
use crate::dashboard::{
    Activity, ActivityKind, Dashboard, Member, MemberStats, SessionKind, UpcomingSession,
};
use crate::error::CatalogError;
use crate::mentor::{Availability, MentorProfile, MentorStats, Review, SkillOffering};
use crate::model::{CatalogItem, Category, MentorSummary};
use crate::repository::{CatalogBuilder, InMemoryCatalog};
use crate::session::{Material, MentoringSession, SessionStatus};
use crate::slots::{parse_date_key, TimeSlot};

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.into_iter().map(str::to_owned).collect()
}

fn avatar_url(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=150&h=150&fit=crop&crop=face")
}

fn mentor(id: &str, name: &str, photo: &str, title: &str) -> MentorSummary {
    MentorSummary {
        id: id.to_owned(),
        name: name.to_owned(),
        avatar: avatar_url(photo),
        title: title.to_owned(),
    }
}

struct Skill<'a> {
    id: &'a str,
    title: &'a str,
    category: Category,
    description: &'a str,
    price: f64,
    duration: &'a str,
    rating: f64,
    review_count: u32,
    students_count: u32,
    next_available: &'a str,
}

impl Skill<'_> {
    fn into_item(self, tags: Vec<String>, mentor: MentorSummary) -> CatalogItem {
        CatalogItem {
            id: self.id.to_owned(),
            title: self.title.to_owned(),
            category: self.category,
            description: self.description.to_owned(),
            price: self.price,
            duration: self.duration.to_owned(),
            rating: self.rating,
            review_count: self.review_count,
            tags,
            mentor,
            students_count: self.students_count,
            next_available: self.next_available.to_owned(),
        }
    }
}

#[must_use]
pub fn demo_skills() -> Vec<CatalogItem> {
    vec![
        Skill {
            id: "1",
            title: "Full-Stack Web Development with React & Node.js",
            category: Category::Programming,
            description: "Learn to build modern web applications from scratch using React, \
                          Node.js, Express, and MongoDB. Perfect for beginners and intermediate \
                          developers.",
            price: 75.0,
            duration: "2 hours",
            rating: 4.9,
            review_count: 127,
            students_count: 1250,
            next_available: "Tomorrow at 2:00 PM",
        }
        .into_item(
            strings(["React", "Node.js", "JavaScript", "MongoDB", "Express"]),
            mentor(
                "m1",
                "Sarah Chen",
                "photo-1494790108755-2616b612b1d7",
                "Senior Full-Stack Developer at Google",
            ),
        ),
        Skill {
            id: "2",
            title: "Acoustic Guitar for Beginners",
            category: Category::Music,
            description: "Start your musical journey with acoustic guitar. Learn basic chords, \
                          strumming patterns, and play your first songs in just a few sessions.",
            price: 45.0,
            duration: "1.5 hours",
            rating: 4.8,
            review_count: 89,
            students_count: 890,
            next_available: "Today at 7:00 PM",
        }
        .into_item(
            strings(["Guitar", "Music Theory", "Chords", "Strumming"]),
            mentor(
                "m2",
                "David Rodriguez",
                "photo-1472099645785-5658abf4ff4e",
                "Professional Musician & Teacher",
            ),
        ),
        Skill {
            id: "3",
            title: "UI/UX Design Fundamentals",
            category: Category::Design,
            description: "Master the principles of user interface and user experience design. \
                          Learn design thinking, prototyping, and create stunning digital \
                          experiences.",
            price: 60.0,
            duration: "2.5 hours",
            rating: 4.9,
            review_count: 156,
            students_count: 2100,
            next_available: "Monday at 10:00 AM",
        }
        .into_item(
            strings(["UI Design", "UX Design", "Figma", "Prototyping", "Design Thinking"]),
            mentor(
                "m3",
                "Emma Thompson",
                "photo-1438761681033-6461ffad8d80",
                "Lead Designer at Adobe",
            ),
        ),
        Skill {
            id: "4",
            title: "Italian Cooking Masterclass",
            category: Category::Cooking,
            description: "Learn authentic Italian recipes and cooking techniques. From pasta \
                          making to perfect risotto, discover the secrets of Italian cuisine.",
            price: 55.0,
            duration: "3 hours",
            rating: 4.7,
            review_count: 73,
            students_count: 650,
            next_available: "Sunday at 3:00 PM",
        }
        .into_item(
            strings([
                "Italian Cuisine",
                "Pasta",
                "Cooking Techniques",
                "Traditional Recipes",
            ]),
            mentor(
                "m4",
                "Marco Antonelli",
                "photo-1507003211169-0a1dd7228f2d",
                "Head Chef at Michelin Star Restaurant",
            ),
        ),
        Skill {
            id: "5",
            title: "Python for Data Science",
            category: Category::Programming,
            description: "Dive into data science with Python. Learn pandas, numpy, matplotlib, \
                          and machine learning basics to analyze and visualize data effectively.",
            price: 85.0,
            duration: "2.5 hours",
            rating: 4.8,
            review_count: 203,
            students_count: 1800,
            next_available: "Wednesday at 6:00 PM",
        }
        .into_item(
            strings(["Python", "Data Science", "Machine Learning", "Pandas", "NumPy"]),
            mentor(
                "m5",
                "Dr. Alex Kumar",
                "photo-1560250097-0b93528c311a",
                "Data Scientist at Microsoft",
            ),
        ),
        Skill {
            id: "6",
            title: "Digital Photography Basics",
            category: Category::Photography,
            description: "Master the fundamentals of digital photography. Learn composition, \
                          lighting, camera settings, and post-processing techniques.",
            price: 50.0,
            duration: "2 hours",
            rating: 4.6,
            review_count: 91,
            students_count: 1100,
            next_available: "Friday at 4:00 PM",
        }
        .into_item(
            strings(["Photography", "Camera Settings", "Composition", "Lightroom", "Editing"]),
            mentor(
                "m6",
                "Lisa Park",
                "photo-1487412720507-e7ab37603c6f",
                "Professional Photographer",
            ),
        ),
    ]
}

pub fn demo_slots() -> Result<Vec<TimeSlot>, CatalogError> {
    [
        ("2024-01-15", "10:00 AM", true),
        ("2024-01-15", "2:00 PM", true),
        ("2024-01-16", "9:00 AM", true),
        ("2024-01-16", "3:00 PM", false),
        ("2024-01-17", "11:00 AM", true),
        ("2024-01-17", "4:00 PM", true),
    ]
    .into_iter()
    .map(|(date, time, available)| Ok(TimeSlot::new(parse_date_key(date)?, time, available)))
    .collect()
}

fn review(id: &str, student: &str, avatar: &str, date: &str, skill: &str, content: &str) -> Review {
    Review {
        id: id.to_owned(),
        student: student.to_owned(),
        avatar: avatar_url(avatar),
        rating: 5,
        date: date.to_owned(),
        skill: skill.to_owned(),
        content: content.to_owned(),
    }
}

fn offering(name: &str, price: f64, sessions: u32, rating: f64) -> SkillOffering {
    SkillOffering {
        name: name.to_owned(),
        price,
        sessions,
        rating,
    }
}

pub fn demo_mentor() -> Result<MentorProfile, CatalogError> {
    Ok(MentorProfile {
        id: "m1".to_owned(),
        name: "Sarah Chen".to_owned(),
        title: "Senior Full-Stack Developer at Google".to_owned(),
        avatar: "https://images.unsplash.com/photo-1494790108755-2616b612b1d7?w=400&h=400&fit=crop&crop=face"
            .to_owned(),
        rating: 4.9,
        review_count: 127,
        location: "San Francisco, CA".to_owned(),
        member_since: "2022".to_owned(),
        response_time: "Usually responds within 2 hours".to_owned(),
        badges: strings(["Top Mentor", "React Expert", "JavaScript Guru"]),
        bio: "I'm a passionate full-stack developer with 8+ years of experience building \
              scalable web applications. I love teaching and helping others master React, \
              Node.js, and modern JavaScript."
            .to_owned(),
        skills: vec![
            offering("React Development", 75.0, 45, 4.9),
            offering("Node.js Backend", 70.0, 32, 4.8),
            offering("JavaScript Fundamentals", 60.0, 67, 4.9),
            offering("TypeScript", 65.0, 28, 4.7),
            offering("MongoDB", 55.0, 22, 4.8),
            offering("API Development", 70.0, 38, 4.9),
        ],
        stats: MentorStats {
            total_sessions: 232,
            students_helped: 156,
            success_rate: 98,
            avg_rating: 4.9,
        },
        availability: Availability {
            timezone: "PST".to_owned(),
            working_hours: "9 AM - 6 PM".to_owned(),
            days_available: strings(["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]),
        },
        reviews: vec![
            review(
                "1",
                "Alex Kumar",
                "photo-1507003211169-0a1dd7228f2d",
                "2 days ago",
                "React Development",
                "Sarah explained React hooks in a way that finally clicked for me.",
            ),
            review(
                "2",
                "Maria Rodriguez",
                "photo-1438761681033-6461ffad8d80",
                "1 week ago",
                "Node.js Backend",
                "Amazing session on building REST APIs!",
            ),
            review(
                "3",
                "David Park",
                "photo-1472099645785-5658abf4ff4e",
                "2 weeks ago",
                "JavaScript Fundamentals",
                "Perfect for beginners! The practical exercises were incredibly helpful.",
            ),
        ],
        slots: demo_slots()?,
    })
}

#[allow(clippy::too_many_arguments)]
fn conversation(
    id: &str,
    name: &str,
    avatar: &str,
    last_message: &str,
    time: &str,
    unread: u32,
    online: bool,
    skill: &str,
) -> Conversation {
    Conversation {
        id: id.to_owned(),
        name: name.to_owned(),
        avatar: avatar_url(avatar),
        last_message: last_message.to_owned(),
        time: time.to_owned(),
        unread,
        online,
        skill: skill.to_owned(),
    }
}

fn message(id: &str, own: bool, content: &str, time: &str) -> Message {
    Message {
        id: id.to_owned(),
        sender: if own { "You" } else { "Sarah Chen" }.to_owned(),
        content: content.to_owned(),
        time: time.to_owned(),
        is_own: own,
    }
}

fn demo_thread() -> Vec<Message> {
    vec![
        message(
            "1",
            false,
            "Hi Alex! I'm excited about our React session tomorrow.",
            "10:30 AM",
        ),
        message(
            "2",
            true,
            "Hi Sarah! Me too. I've prepared some questions about hooks and state management.",
            "10:32 AM",
        ),
        message(
            "3",
            false,
            "Perfect! Those are great topics. I'll prepare some practical examples we can work \
             through together.",
            "10:35 AM",
        ),
        message(
            "4",
            true,
            "That sounds amazing. Should we use your CodePen or would you prefer a different \
             environment?",
            "10:37 AM",
        ),
        message(
            "5",
            false,
            "Great! Let's schedule our React session for tomorrow. I'll set up a shared \
             CodeSandbox environment so we can code together in real-time.",
            "10:40 AM",
        ),
    ]
}

pub fn demo_session() -> Result<MentoringSession, CatalogError> {
    const STARTS_AT: &str = "2024-01-20T14:00:00";
    let starts_at = NaiveDateTime::parse_from_str(STARTS_AT, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| CatalogError::InvalidDate(STARTS_AT.to_owned()))?;
    Ok(MentoringSession {
        id: "session-123".to_owned(),
        title: "Advanced React Hooks & State Management".to_owned(),
        description: "Deep dive into React hooks, custom hooks, and advanced state management \
                      patterns including Context API and useReducer."
            .to_owned(),
        status: SessionStatus::Upcoming,
        mentor: mentor(
            "m1",
            "Sarah Chen",
            "photo-1494790108755-2616b612b1d7",
            "Senior Developer at Google",
        ),
        starts_at,
        duration_minutes: 120,
        price: 75.0,
        timezone: "PST".to_owned(),
        meeting_link: "https://meet.google.com/abc-defg-hij".to_owned(),
        materials: [
            ("React Hooks Cheatsheet", "pdf"),
            ("Practice Project Files", "zip"),
            ("Additional Resources", "link"),
        ]
        .into_iter()
        .map(|(name, kind)| Material {
            name: name.to_owned(),
            url: "#".to_owned(),
            kind: kind.to_owned(),
        })
        .collect(),
        learning_goals: strings([
            "Master advanced React hooks (useCallback, useMemo, useRef)",
            "Understand when and how to use Context API",
            "Learn custom hook patterns and best practices",
            "Implement useReducer for complex state management",
        ]),
        notes: "Please review the React docs on hooks before our session.".to_owned(),
    })
}

fn demo_session_chat() -> Vec<Message> {
    vec![
        message(
            "1",
            false,
            "Hi Alex! Looking forward to our React hooks session tomorrow. Did you get a chance \
             to review the materials I sent?",
            "2:30 PM",
        ),
        message(
            "2",
            true,
            "Hi Sarah! Yes, I went through the cheatsheet. I have some questions about \
             useCallback and when to use it.",
            "2:45 PM",
        ),
        message(
            "3",
            false,
            "Perfect! That's exactly what we'll cover. useCallback is great for optimizing \
             performance when passing functions to child components.",
            "2:47 PM",
        ),
        message(
            "4",
            true,
            "Awesome! Should I set up any specific development environment?",
            "3:00 PM",
        ),
        message(
            "5",
            false,
            "Just have VS Code ready with React dev tools extension. I'll share a CodeSandbox \
             link during our session for hands-on coding.",
            "3:05 PM",
        ),
    ]
}

fn upcoming(
    id: &str,
    title: &str,
    kind: SessionKind,
    counterpart: &str,
    (date, time, duration): (&str, &str, &str),
    photo: &str,
) -> UpcomingSession {
    UpcomingSession {
        id: id.to_owned(),
        title: title.to_owned(),
        kind,
        counterpart: counterpart.to_owned(),
        date: date.to_owned(),
        time: time.to_owned(),
        duration: duration.to_owned(),
        avatar: avatar_url(photo),
    }
}

fn activity(id: &str, kind: ActivityKind, title: &str, time: &str) -> Activity {
    Activity {
        id: id.to_owned(),
        kind,
        title: title.to_owned(),
        time: time.to_owned(),
    }
}

#[must_use]
pub fn demo_dashboard() -> Dashboard {
    Dashboard {
        member: Member {
            name: "Alex Johnson".to_owned(),
            avatar: avatar_url("photo-1472099645785-5658abf4ff4e"),
            email: "alex@example.com".to_owned(),
            role: "both".to_owned(),
            member_since: "January 2024".to_owned(),
            stats: MemberStats {
                skills_learned: 12,
                skills_taught: 8,
                total_sessions: 45,
                rating: 4.8,
                earnings: 2150,
                students: 89,
            },
        },
        upcoming_sessions: vec![
            upcoming(
                "1",
                "React Hooks Deep Dive",
                SessionKind::Learning,
                "Sarah Chen",
                ("Tomorrow", "2:00 PM", "2 hours"),
                "photo-1494790108755-2616b612b1d7",
            ),
            upcoming(
                "2",
                "UI/UX Design Fundamentals",
                SessionKind::Teaching,
                "Emily Davis",
                ("Friday", "10:00 AM", "1.5 hours"),
                "photo-1438761681033-6461ffad8d80",
            ),
        ],
        recent_activity: vec![
            activity(
                "1",
                ActivityKind::SessionCompleted,
                "Completed Python for Data Science",
                "2 hours ago",
            ),
            activity(
                "2",
                ActivityKind::ReviewReceived,
                "Received 5-star review for Guitar lesson",
                "1 day ago",
            ),
            activity(
                "3",
                ActivityKind::BookingReceived,
                "New booking for Web Development session",
                "2 days ago",
            ),
        ],
    }
}

/// The complete demo marketplace.
pub fn demo_catalog() -> Result<InMemoryCatalog, CatalogError> {
    CatalogBuilder::new()
        .skills(demo_skills())
        .mentor(demo_mentor()?)
        .conversation(
            conversation(
                "1",
                "Sarah Chen",
                "photo-1494790108755-2616b612b1d7",
                "Great! Let's schedule our React session for tomorrow.",
                "2m ago",
                2,
                true,
                "React Development",
            ),
            demo_thread(),
        )
        .conversation(
            conversation(
                "2",
                "David Rodriguez",
                "photo-1472099645785-5658abf4ff4e",
                "Thanks for the guitar lesson! It was amazing.",
                "1h ago",
                0,
                false,
                "Guitar Lessons",
            ),
            Vec::new(),
        )
        .conversation(
            conversation(
                "3",
                "Emma Thompson",
                "photo-1438761681033-6461ffad8d80",
                "Can we reschedule our UI/UX session?",
                "3h ago",
                1,
                true,
                "UI/UX Design",
            ),
            Vec::new(),
        )
        .conversation(
            conversation(
                "4",
                "Marco Antonelli",
                "photo-1507003211169-0a1dd7228f2d",
                "Looking forward to our cooking session!",
                "1d ago",
                0,
                false,
                "Italian Cooking",
            ),
            Vec::new(),
        )
        .session(demo_session()?, demo_session_chat())
        .dashboard(demo_dashboard())
        .build()
}
