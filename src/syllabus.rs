//! CEH Course Syllabus
//!
//! The fixed 12-module course index. It is compiled in, never mutated, and
//! used both for browsing and as grounding context for every generation
//! request.

use std::fmt::Write as _;

/// A narrower unit of study within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subtopic {
    pub title: &'static str,
    pub time: &'static str,
    pub details: Option<&'static [&'static str]>,
}

/// A top-level syllabus unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    pub id: u32,
    pub title: &'static str,
    pub duration: &'static str,
    pub subtopics: &'static [Subtopic],
    pub outcomes: &'static [&'static str],
}

impl Module {
    /// Subtopic by zero-based position.
    pub fn subtopic(&self, index: usize) -> Option<&'static Subtopic> {
        self.subtopics.get(index)
    }

    /// Subtopic by title, ignoring ASCII case and surrounding whitespace.
    pub fn find_subtopic(&self, title: &str) -> Option<&'static Subtopic> {
        let wanted = title.trim();
        self.subtopics
            .iter()
            .find(|s| s.title.eq_ignore_ascii_case(wanted))
    }
}

const fn topic(
    title: &'static str,
    time: &'static str,
    details: &'static [&'static str],
) -> Subtopic {
    Subtopic {
        title,
        time,
        details: Some(details),
    }
}

pub static COURSE_MODULES: [Module; 12] = [
    Module {
        id: 1,
        title: "Foundations: Ethics, Security, and Attack Methodology",
        duration: "60 Minutes",
        subtopics: &[
            topic("Hacking & Ethics", "15 min", &[
                "Ethical Hacking Definition",
                "Hacker Classes (White Hat, Black Hat, Gray Hat, Hacktivism)",
            ]),
            topic("Security Pillars", "15 min", &[
                "CIA Triad (Confidentiality, Integrity, Availability)",
                "Security, Functionality, and Ease of Use Triangle",
            ]),
            topic("Methodology & Legality", "30 min", &[
                "Prerequisites for Ethical Hacking (Authorization, Scope)",
                "Vulnerability Assessment vs. Penetration Testing",
                "The Five Phases of Ethical Hacking (Reconnaissance, Scanning, Gaining Access, Maintaining Access, Clearing Tracks)",
            ]),
        ],
        outcomes: &[
            "Define ethical hacking and differentiate between hacker types and their motivations.",
            "Explain the foundational goals of security: the CIA Triad and the Security/Functionality balance.",
            "Outline the chronological five phases of an ethical hack.",
        ],
    },
    Module {
        id: 2,
        title: "Lab Setup & Core Technical Foundations",
        duration: "75 Minutes",
        subtopics: &[
            topic("Essential Skills", "25 min", &[
                "Required Skills (OS, Networking, Programming)",
                "Introduction to Kali Linux and VM Setup",
                "Python's Role in Ethical Hacking/Scripting",
            ]),
            topic("Networking Basics", "30 min", &[
                "OSI Model Layers",
                "TCP/IP Architecture",
                "TCP Flags and the Three-Way Handshake",
            ]),
            topic("Command Line & Evasion", "20 min", &[
                "Essential Linux Utilities (grep, sudo, ls, cd)",
                "Anonymity using Proxy Chains",
            ]),
        ],
        outcomes: &[
            "Set up and navigate a virtualized penetration testing environment (Kali Linux).",
            "Demonstrate proficiency in core networking concepts, including segment structure and connection establishment.",
            "Understand the necessity of command-line tools and Python scripting for automated tasks.",
        ],
    },
    Module {
        id: 3,
        title: "Phase 1: Footprinting and Passive Reconnaissance",
        duration: "75 Minutes",
        subtopics: &[
            topic("Recon Concepts", "15 min", &[
                "Passive vs. Active Reconnaissance",
                "Goals of Footprinting (Domains, IP Ranges, Architecture, Employees)",
            ]),
            topic("OSINT and Public Data", "20 min", &[
                "Domain and IP lookup using Whois",
                "DNS queries (dig, nslookup)",
                "Traceroute",
            ]),
            topic("Google Hacking", "25 min", &[
                "Using advanced search operators (Dorks) (site:, inurl:, filetype:)",
                "Utilizing the Exploit-DB Google Hacking Database",
            ]),
            topic("Advanced Tools", "15 min", &[
                "theHarvester",
                "Maltego",
                "Subdomain enumeration tools (Sublister, CrT.sh)",
            ]),
        ],
        outcomes: &[
            "Gather passive intelligence on a target using Open Source Intelligence (OSINT) methods.",
            "Apply Google Dorking to discover sensitive or hidden publicly exposed information.",
            "Identify target subdomains and associated network infrastructure.",
        ],
    },
    Module {
        id: 4,
        title: "Phase 2: Scanning Networks & Enumeration I (Nmap)",
        duration: "70 Minutes",
        subtopics: &[
            topic("Scanning Objectives", "10 min", &[
                "Objectives of Scanning (Network, Port, Vulnerability)",
            ]),
            topic("Port Scan Types", "15 min", &[
                "TCP Scan Types (SYN/Stealth, Connect, XMAS, NULL, FIN)",
                "ICMP sweep importance and pitfalls",
            ]),
            topic("Nmap Mastery", "25 min", &[
                "Detailed command syntax",
                "Target Specification (CIDR)",
                "Using Nmap flags (-sS, -sV, -O, -A)",
                "Timing Templates (T0-T5) for Stealth",
            ]),
            topic("Enumeration Overview", "20 min", &[
                "Services and Ports for Enumeration",
                "Banner Grabbing for OS/Service Version Detection",
            ]),
        ],
        outcomes: &[
            "Execute various Nmap scans to map live hosts, identify open ports, and determine operating systems.",
            "Distinguish between and apply different port scanning techniques (e.g., stealth vs. full connect).",
            "Understand the goals of enumeration in finding user accounts and exposed shares.",
        ],
    },
    Module {
        id: 5,
        title: "Phase 2/3: Enumeration II & Vulnerability Analysis",
        duration: "75 Minutes",
        subtopics: &[
            topic("Service Enumeration Techniques", "25 min", &[
                "NetBIOS Enumeration (14:40)",
                "SNMP Enumeration (06:20)",
                "SMTP/FTP/RPC Enumeration",
            ]),
            topic("Vulnerability Concepts", "15 min", &[
                "Vulnerability Research and Classification",
                "Vulnerability Assessment Life Cycle",
                "Exploit vs. Vulnerability vs. Risk",
            ]),
            topic("Automated Scanning Tools", "35 min", &[
                "Nessus (Basic/Advanced Network Scan, Reporting, Remediations)",
                "OpenVAS/Greenbone (Target setup, Credentials, Scan Configs)",
            ]),
        ],
        outcomes: &[
            "Perform network service enumeration (SMB, SNMP) to extract system and user information.",
            "Analyze and categorize vulnerabilities using professional tools like Nessus.",
            "Understand how to configure and run specialized scans, including credentialed scans.",
        ],
    },
    Module {
        id: 6,
        title: "Phase 3: System Hacking and Exploitation",
        duration: "70 Minutes",
        subtopics: &[
            topic("Password Cracking", "25 min", &[
                "Password Cracking Concepts",
                "Attack Types (Brute-Force, Dictionary)",
                "Hash Dumping (Windows SAM, Shadow files)",
                "Tools (John the Ripper, Hashcat)",
            ]),
            topic("Exploitation Frameworks", "25 min", &[
                "Metasploit Framework Architecture (Modules, Payloads, Auxiliaries)",
                "Basic Exploitation Demonstration",
            ]),
            topic("Custom Payload Generation", "20 min", &[
                "Generating Payloads using MSF Venom",
                "Using Encoders for Antivirus Evasion",
            ]),
        ],
        outcomes: &[
            "Execute password attacks on compromised hashes using brute force and dictionary techniques.",
            "Utilize the Metasploit Framework to execute exploits and manage sessions.",
            "Generate custom payloads and apply encoding to bypass standard security defenses.",
        ],
    },
    Module {
        id: 7,
        title: "Malware Threats and Steganography",
        duration: "60 Minutes",
        subtopics: &[
            topic("Malware Types", "20 min", &[
                "Classification (Trojans, Viruses, Worms, Backdoors)",
                "APT, Fileless Malware, and Rootkits",
            ]),
            topic("Analysis and Defense", "20 min", &[
                "Malware Analysis Procedure (Static vs. Dynamic Analysis)",
                "Anti-Malware Solutions",
            ]),
            topic("Ransomware and Mitigation", "10 min", &[
                "Understanding Ransomware Attacks",
                "Mitigation Strategies (CEH v13 update)",
            ]),
            topic("Covert Hiding", "10 min", &[
                "Steganography Concepts and Methods (Text, Image, LSB)",
            ]),
        ],
        outcomes: &[
            "Categorize and identify various types of malware, including modern fileless threats.",
            "Explain the basic steps involved in malware analysis (preparing a test bed).",
            "Implement steganography to hide data within files for covert communication.",
        ],
    },
    Module {
        id: 8,
        title: "Sniffing, DoS, and Defense Evasion",
        duration: "60 Minutes",
        subtopics: &[
            topic("Sniffing and Capture", "25 min", &[
                "Sniffing Concepts",
                "Protocols Vulnerable to Sniffing",
                "Using Wireshark (Interface, Display Filters, Protocol Decodes, Follow TCP Stream)",
            ]),
            topic("Denial-of-Service", "15 min", &[
                "DoS/DDoS Concepts",
                "Attack Techniques (SYN Flood, Fragmentation Attack, Smurf Attack)",
            ]),
            topic("Defense Evasion", "20 min", &[
                "Evading IDS, Firewalls, and Honeypots",
                "Evasion Techniques (Packet Fragmentation, HTTP Tunneling, Session Splicing)",
            ]),
        ],
        outcomes: &[
            "Analyze network traffic for security flaws and exposed data using Wireshark.",
            "Understand the principles of DoS/DDoS attacks and their impact on availability.",
            "Apply methods to bypass or avoid detection by common security devices like IDS and Firewalls.",
        ],
    },
    Module {
        id: 9,
        title: "Social Engineering and Session Hijacking",
        duration: "65 Minutes",
        subtopics: &[
            topic("Social Engineering Concepts", "15 min", &[
                "Phases of Attack",
                "Insider Threats/Attacks",
            ]),
            topic("Attack Techniques", "20 min", &[
                "Human-based Social Engineering (Pretexting, Impersonation)",
                "Phishing and Spear Phishing",
                "Social Engineering Toolkit",
            ]),
            topic("Session Hijacking", "15 min", &[
                "Network-level Session Hijacking",
                "Sequence Number Guessing",
            ]),
            topic("Countermeasures", "15 min", &[
                "Detecting Phishing Emails",
                "Defense against Insider Threats",
                "Session Hijacking Prevention",
            ]),
        ],
        outcomes: &[
            "Understand the psychological principles and phases behind social engineering attacks.",
            "Identify and simulate various social engineering attacks, particularly phishing.",
            "Analyze and mitigate session-level attacks using sequence prediction and authentication controls.",
        ],
    },
    Module {
        id: 10,
        title: "Web Application Hacking (Servers, Apps, and SQLi)",
        duration: "65 Minutes",
        subtopics: &[
            topic("Web Server Hacking", "15 min", &[
                "Web Server Operations (IIS/Apache)",
                "Attacks (Banner Grabbing, Directory Traversal)",
            ]),
            topic("Web Application Security", "15 min", &[
                "OWASP Top 10 Application Security Risks",
                "Introduction to Cross-Site Scripting (XSS)",
            ]),
            topic("SQL Injection Theory", "20 min", &[
                "What is SQL Injection",
                "Types of SQLi (Union, Blind, Time-Based)",
                "Methodology and Tools (SQLmap, Burp Suite, ZAP)",
            ]),
            topic("SQLi Countermeasures", "15 min", &[
                "Evasion Techniques (Evading IDS)",
                "Defensive Coding (Parameterized Queries, Input Validation)",
            ]),
        ],
        outcomes: &[
            "Identify web server weaknesses and application risks using frameworks like the OWASP Top 10.",
            "Execute fundamental web application attacks, including XSS and SQL injection.",
            "Develop strong countermeasures for SQL injection vulnerabilities.",
        ],
    },
    Module {
        id: 11,
        title: "Specialized Targets: Wireless, Mobile, IoT, & Cloud",
        duration: "65 Minutes",
        subtopics: &[
            topic("Wireless Hacking", "15 min", &[
                "Wireless Encryption (WEP, WPA/WPA2)",
                "Hacking Methodology and Tools (Aircrack-ng)",
            ]),
            topic("Mobile Hacking", "15 min", &[
                "Mobile Platform Attack Vectors (Android/iOS Hacking)",
                "OWASP Top 10 Mobile Risks",
            ]),
            topic("IoT/OT Hacking", "20 min", &[
                "IoT Architecture and Protocols",
                "OWASP Top 10 IoT Vulnerabilities",
                "OT (Operational Technology) Security",
            ]),
            topic("Cloud Computing", "15 min", &[
                "Cloud Deployment Models (IaaS, PaaS, SaaS)",
                "Cloud Threats and Attacks",
                "Cloud Penetration Testing",
            ]),
        ],
        outcomes: &[
            "Evaluate the security of wireless networks and execute password cracking techniques.",
            "Identify risks in mobile, IoT, and OT environments.",
            "Understand the unique threats and pen testing considerations for cloud environments.",
        ],
    },
    Module {
        id: 12,
        title: "Cryptography, AI, and Future Threats",
        duration: "75 Minutes",
        subtopics: &[
            topic("Cryptography Basics", "25 min", &[
                "Symmetric Key (DES, AES) vs. Asymmetric Key (RSA)",
                "Cryptographic Hashing (MD5, SHA)",
                "PKI and Digital Signatures/Non-Repudiation",
            ]),
            topic("Advanced Hacking Topics", "25 min", &[
                "AI/ML in Ethical Hacking (Vulnerability Scanning, Automating Tasks)",
                "Zero Trust Architecture (CEH v13)",
                "Quantum Computing Risks/Post-Quantum Cryptography",
            ]),
            topic("Post-Exploitation & Reporting", "25 min", &[
                "Privilege Escalation",
                "Maintaining Access",
                "Clearing Tracks/Log Deletion",
                "Professional Report Writing (Executive Summary, Findings, Remediation/Mitigation)",
            ]),
        ],
        outcomes: &[
            "Explain core cryptographic concepts, algorithms, and Public Key Infrastructure (PKI).",
            "Analyze the role of AI and Machine Learning in enhancing security and offense strategies (CEH v13).",
            "Summarize essential post-exploitation techniques and create a comprehensive ethical hacking report.",
        ],
    },
];

/// All modules in course order.
pub fn modules() -> &'static [Module] {
    &COURSE_MODULES
}

/// Module by its 1-based course id.
pub fn find_module(id: u32) -> Option<&'static Module> {
    COURSE_MODULES.iter().find(|m| m.id == id)
}

/// Render the syllabus as grounding context for the system instruction.
///
/// One block per module: id and title, outcomes joined with ". ", then one
/// line per subtopic with its details in parentheses.
pub fn system_context() -> String {
    render_context(modules())
}

pub(crate) fn render_context(modules: &[Module]) -> String {
    let blocks: Vec<String> = modules.iter().map(render_module_block).collect();
    blocks.join("\n\n")
}

fn render_module_block(module: &Module) -> String {
    let mut block = String::new();
    let _ = writeln!(block);
    let _ = writeln!(block, "Module {}: {}", module.id, module.title);
    let _ = writeln!(block, "Outcomes: {}", module.outcomes.join(". "));
    let _ = writeln!(block, "Subtopics:");
    let lines: Vec<String> = module
        .subtopics
        .iter()
        .map(|s| format!("- {} ({})", s.title, s.details.unwrap_or(&[]).join(", ")))
        .collect();
    block.push_str(&lines.join("\n"));
    block.push('\n');
    block
}
