use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Jam {
    Table,
    Id,
    Status,
    EventName,
    EventKind,
    PrimaryGenre,
    SkillLevel,
    VenueName,
    Address,
    City,
    Region,
    GreaterRegion,
    State,
    DayOfWeek,
    StartTime,
    EndTime,
    RecurrenceDescription,
    Frequency,
    WeeksOfMonth,
    StartDate,
    EndDate,
    TimeOfDay,
    AvgCrowdSize,
    InviteStatus,
    CoverChargeType,
    IncludesDancing,
    IsHouseJam,
    IsFestival,
    WebsiteUrl,
    ContactEmail,
    EventDescription,
    OwnerEmail,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum JamReview {
    Table,
    Id,
    JamId,
    DisplayName,
    Comments,
    OverallRating,
    NetworkingRating,
    InfoAccuracyRating,
    Happened,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum JamClaim {
    Table,
    Id,
    JamId,
    ClaimantEmail,
    PhoneNumber,
    Notes,
    Status,
    CreatedAt,
}
