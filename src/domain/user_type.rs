use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    Restaurant,
    Customer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Restaurant => "restaurant",
            UserType::Customer => "customer",
        }
    }

    pub fn parse(value: &str) -> Result<UserType, String> {
        match value {
            "admin" => Ok(UserType::Admin),
            "restaurant" => Ok(UserType::Restaurant),
            "customer" => Ok(UserType::Customer),
            other => Err(format!("{} is not a valid usertype", other)),
        }
    }

    // Restaurant accounts wait for an admin decision, everyone else starts approved
    pub fn initial_approval(&self) -> Approval {
        match self {
            UserType::Restaurant => Approval::Pending,
            _ => Approval::Approved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approval {
    Pending,
    Approved,
    Rejected,
}

impl Approval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Approval::Pending => "pending",
            Approval::Approved => "approved",
            Approval::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Result<Approval, String> {
        match value {
            "pending" => Ok(Approval::Pending),
            "approved" => Ok(Approval::Approved),
            "rejected" => Ok(Approval::Rejected),
            other => Err(format!("{} is not a valid approval state", other)),
        }
    }
}
