// Canned bodies served by the mock backend.

use serde_json::{json, Value};

pub const MOCK_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
pub const MOCK_ERROR: &str = "Fake mock server error.";

pub fn message(text: &str) -> Value {
    json!({ "message": text })
}

pub fn login_grant() -> Value {
    json!({ "token": MOCK_TOKEN, "userType": "academic" })
}

pub fn verify_grant() -> Value {
    json!({ "token": MOCK_TOKEN, "userType": "admin" })
}

fn course_card(name: &str, code: &str, school: &str, thumbnail: &str) -> Value {
    json!({ "name": name, "code": code, "school": school, "thumbnail": thumbnail })
}

pub fn student_courses() -> Value {
    json!({
        "courses": [
            course_card(
                "Introduction to Computer Science",
                "COMP1111",
                "Computer Science Department",
                "https://i.natgeofe.com/n/6e8d8a34-243d-4b47-9de2-a393271de8f7/3143130_3x4.jpg",
            ),
            course_card(
                "Calculus I",
                "MATH101",
                "Mathematics Department",
                "https://upload.wikimedia.org/wikipedia/commons/7/79/2010-brown-bear.jpg",
            ),
            course_card(
                "History of Art",
                "ART200",
                "Fine Arts Department",
                "https://gifts.worldwildlife.org/gift-center/Images/large-species-photo/large-Grizzly-Bear-photo.jpg",
            ),
        ]
    })
}

pub fn academic_courses() -> Value {
    json!({
        "courses": [
            course_card(
                "Introduction to Computer Science",
                "COMP1111",
                "Computer Science Department",
                "https://i.natgeofe.com/n/6e8d8a34-243d-4b47-9de2-a393271de8f7/3143130_3x4.jpg",
            ),
            course_card(
                "History of Art",
                "ART200",
                "Fine Arts Department",
                "https://gifts.worldwildlife.org/gift-center/Images/large-species-photo/large-Grizzly-Bear-photo.jpg",
            ),
        ]
    })
}

pub fn course_detail() -> Value {
    json!({
        "name": "Computer Science Project",
        "code": "COMP3900",
        "uoc": 12,
        "topics": ["Fundamental programming concepts", "Introduction to Computer Science"],
        "description": "An introductory course covering the basics of computer science and programming.",
        "skills": { "Swift": 20, "Angular": 30.44, "Python": 50 },
        "knowledge": { "c++": 20, "Java": 30, "data structures": 50 },
        "thumbnail": "https://i.natgeofe.com/n/6e8d8a34-243d-4b47-9de2-a393271de8f7/3143130_3x4.jpg",
        "currentVersion": "1",
        "school": "Computer Science School",
        "availableVersions": ["1", "2"],
        "currentYear": 2022,
        "currentTerm": "T2",
        "availableYearTerms": [[2022, "T2"], [2023, "T3"]],
    })
}

fn project_card(id: i64, name: &str, knowledge: Value, client: &str, thumbnail: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "knowledge": knowledge,
        "skills": { "writing": 60, "speaking": 40 },
        "client": client,
        "thumbnail": thumbnail,
    })
}

pub fn project_list() -> Value {
    json!({
        "projects": [
            project_card(
                1,
                "Fitness Tracker",
                json!({ "JavaScript": 90, "React": 10 }),
                "Jane Doe",
                "https://cdn.dribbble.com/users/1233499/screenshots/4571542/photoshop1.gif",
            ),
            project_card(
                2,
                "Recipe App",
                json!({ "Python": 90, "Django": 10 }),
                "Alice Johnson",
                "https://techcrunch.com/wp-content/uploads/2022/01/Multi-Device.jpg",
            ),
            project_card(
                3,
                "E-commerce Website",
                json!({ "JavaScript": 60, "Vue.js": 30, "Firebase": 10 }),
                "Bob Williams",
                "https://colorlib.com/wp/wp-content/uploads/sites/2/ecommerce-website-builder.jpg",
            ),
        ]
    })
}

pub fn project_detail(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Fitness Tracker",
        "client": "Jane Doe",
        "skills": { "JavaScript": 90, "React": 10 },
        "knowledge": { "writing": 60, "speaking": 40 },
        "thumbnail": "https://cdn.dribbble.com/users/1233499/screenshots/4571542/photoshop1.gif",
        "scope": "Track steps, distance, calories and heart rate, with personal goals and progress over time.",
        "topics": ["topic 1", "topic 2"],
        "percentageMatch": 50,
        "missingKnowledge": ["c++", "JavaScript"],
        "missingSkills": ["problem solving", "communication"],
        "requirements": "Completed COMP1511",
        "outcomes": "A fitness tracking application that synchronises with wearable devices.",
        "groups": [
            { "id": 15, "groupName": "best group", "members": ["z5255135", "z5288212"] },
            { "id": 72, "groupName": "another group", "members": ["z5455335", "z5282674"] },
        ],
    })
}

pub fn profile() -> Value {
    json!({
        "zId": "z5255135",
        "firstName": "James",
        "lastName": "Adam",
        "email": "z5255135@unsw.edu.au",
        "headline": "Headline string",
        "summary": "summary",
        "profilePath": "https://i.natgeofe.com/n/6e8d8a34-243d-4b47-9de2-a393271de8f7/3143130_3x4.jpg",
        "userType": "admin",
    })
}

pub fn profile_courses() -> Value {
    json!({
        "courses": [
            { "courseCode": "COMP1511", "courseName": "Programming Fundamentals", "yearDate": 2021, "term": "T1" },
            { "courseCode": "COMP2521", "courseName": "Data Structures and Algorithms", "yearDate": 2021, "term": "T3" },
        ]
    })
}

pub fn profile_skills() -> Value {
    json!({ "skills": { "C": 70, "problem solving": 55, "data structures": 40 } })
}

pub fn recommended_users() -> Value {
    json!({
        "students": [
            { "zID": "z5288212", "firstName": "Mia", "lastName": "Chen", "similarity": 0.82 },
            { "zID": "z5455335", "firstName": "Leo", "lastName": "Park", "similarity": 0.64 },
        ]
    })
}

pub fn all_users() -> Value {
    json!({
        "users": [
            { "zID": "z5255135", "firstName": "James", "lastName": "Adam", "email": "z5255135@unsw.edu.au", "userType": ["student", "admin"] },
            { "zID": "z5288212", "firstName": "Mia", "lastName": "Chen", "email": "z5288212@unsw.edu.au", "userType": ["student"] },
            { "zID": "z1234567", "firstName": "Grace", "lastName": "Hopper", "email": "z1234567@unsw.edu.au", "userType": ["academic"] },
        ]
    })
}

pub fn all_courses() -> Value {
    json!({
        "courses": [
            { "courseCode": "COMP1111", "courseName": "Introduction to Computer Science", "yearDate": 2023, "term": "T1", "school": "Computer Science Department" },
            { "courseCode": "MATH101", "courseName": "Calculus I", "yearDate": 2023, "term": "T2", "school": "Mathematics Department" },
        ]
    })
}

pub fn all_projects() -> Value {
    json!({
        "projects": [
            { "id": 1, "projectName": "Fitness Tracker", "client": "Jane Doe" },
            { "id": 2, "projectName": "Recipe App", "client": "Alice Johnson" },
            { "id": 3, "projectName": "E-commerce Website", "client": "Bob Williams" },
        ]
    })
}

pub fn dashboard() -> Value {
    json!({
        "dashboard": {
            "userCount": { "student": 2, "academic": 1, "admin": 1 },
            "courseCount": 2,
            "projectCount": 3,
        }
    })
}
