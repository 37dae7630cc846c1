/// One hundred distinct names: the whole universe a server can be asked
/// about in the end-to-end scenario.
pub const NAMES: [&str; 100] = [
    "Noah Porter", "Lynn Drake", "Freda Rice", "Lana Carr", "Lawrence Harmon",
    "Raymond Sparks", "Hattie Gordon", "Ronald Alvarado", "Abel Quinn",
    "Bill Murray", "Daisy Banks", "Kayla Perkins", "Gilberto Hawkins",
    "Mildred Luna", "Tabitha Bridges", "Mike Vaughn", "Kirk Myers",
    "Javier Park", "Kyle Carson", "Juanita Poole", "Lionel Harrison",
    "Ricky Mack", "Melissa Chavez", "Rhonda Johnston", "Victor Knight",
    "Christopher Cox", "Al Barnes", "Jerome Wong", "Veronica Townsend",
    "Armando Owens", "Jesus Palmer", "Wilson Waters", "Lorraine Lawson",
    "Ronnie Murphy", "Rita Hampton", "Jennifer Jones", "Emanuel Mathis",
    "Kerry Cannon", "Jessie Bradley", "Stephanie Hodges", "Ken Moss",
    "Yvonne Pittman", "Ida Lane", "Brad Bowen", "Patti Blair",
    "Alberta Fields", "Jeannie Martinez", "Ernestine Cunningham",
    "Claudia French", "Russell Reyes", "Allan Garcia", "Earl Jordan",
    "Arnold Duncan", "Jon Peterson", "Winifred Lucas", "Dominick Boyd",
    "Julius Floyd", "Keith Price", "Jonathan Hopkins", "Cynthia Hines",
    "Rene Mullins", "Lucy Sanders", "Lori Black", "Elsa Lindsey",
    "Patrick Ryan", "Damon Rodriguez", "Diana Griffin", "Vernon Summers",
    "Vanessa Ingram", "Marcus Lewis", "Holly Thompson", "Irving Estrada",
    "Joy Hayes", "Dana Walsh", "Gilbert Reed", "Sherri Patterson",
    "Katherine Nguyen", "Beatrice Cohen", "Guadalupe Robinson", "Jake Hubbard",
    "Ginger Haynes", "Danielle West", "Judith Fleming", "Margie Daniel",
    "Eddie Collier", "Lindsay Riley", "Clay Terry", "Tami Willis",
    "Maxine Harvey", "Monica Robertson", "Teri Miles", "Amelia Andrews",
    "Sheryl Parks", "Anthony Cook", "Willis Brock", "Billie Bass",
    "Steven Patrick", "Clifford Steele", "Myron Burton", "Blanca Gill",
];
